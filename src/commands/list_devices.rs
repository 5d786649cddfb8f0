//! List available audio output devices.

use crate::audio::quiet_stderr;
use anyhow::anyhow;
use console::style;
use cpal::traits::{DeviceTrait, HostTrait};

/// Prints every output device with the index and name accepted by `audio.device`.
///
/// # Errors
/// - If the audio host cannot enumerate devices
pub fn handle_list_devices() -> Result<(), anyhow::Error> {
    let (host, devices) = quiet_stderr(|| {
        let host = cpal::default_host();
        let devices: Vec<cpal::Device> = host
            .output_devices()
            .map_err(|e| anyhow!("Failed to enumerate audio devices: {e}"))?
            .filter(|d| d.name().is_ok())
            .collect();
        Ok((host, devices))
    })?;

    if devices.is_empty() {
        println!("No audio output devices found on this system.");
        return Ok(());
    }

    println!();
    println!("{}", style("Available audio output devices:").bold());
    println!();

    let default_device = host.default_output_device().and_then(|d| d.name().ok());

    for (index, device) in devices.iter().enumerate() {
        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        let default_indicator = if default_device.as_ref() == Some(&device_name) {
            " [DEFAULT]"
        } else {
            ""
        };

        let config_info = match device.default_output_config() {
            Ok(config) => format!(
                " ({}Hz, {} channels, {:?})",
                config.sample_rate().0,
                config.channels(),
                config.sample_format()
            ),
            Err(_) => " (configuration unavailable)".to_string(),
        };

        println!("  ID: {index}");
        println!("    Name: {device_name}{}", style(default_indicator).green());
        println!("    Config:{config_info}");
        println!();
    }

    println!(
        "Set {} in {} to an ID or name.",
        style("audio.device").cyan(),
        style("~/.config/fourierpaint/fourierpaint.toml").dim()
    );
    Ok(())
}
