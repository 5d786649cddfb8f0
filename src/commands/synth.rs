//! Headless 1D synthesis: bumps from the command line to a WAV file.

use crate::audio::{self, TonePlayer};
use crate::config::PaintConfig;
use crate::spectrum::readout::tone_buffer;
use crate::spectrum::{Editor1D, Spectrum1D, StripGeometry};
use anyhow::anyhow;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// One `--bump BIN[:AMP[:SIGMA]]` argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BumpArg {
    /// Strip pixel, i.e. centered bin
    pub bin: f64,
    pub amplitude: f64,
    pub sigma: f64,
}

impl FromStr for BumpArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let mut number = |name: &str, default: Option<f64>| -> Result<f64, String> {
            match (parts.next(), default) {
                (Some(text), _) if !text.is_empty() => {
                    let value: f64 = text
                        .trim()
                        .parse()
                        .map_err(|_| format!("invalid {name} '{text}' in bump '{s}'"))?;
                    if value.is_finite() {
                        Ok(value)
                    } else {
                        Err(format!("{name} in bump '{s}' must be finite"))
                    }
                }
                (None, Some(default)) => Ok(default),
                _ => Err(format!("missing {name} in bump '{s}'")),
            }
        };

        let bin = number("bin", None)?;
        let amplitude = number("amplitude", Some(1.0))?;
        let sigma = number("sigma", Some(1.0))?;
        if parts.next().is_some() {
            return Err(format!("bump '{s}' has more than three fields"));
        }
        if bin < 0.0 {
            return Err(format!("bin in bump '{s}' must not be negative"));
        }
        if sigma <= 0.0 {
            return Err(format!("sigma in bump '{s}' must be positive"));
        }
        Ok(BumpArg {
            bin,
            amplitude,
            sigma,
        })
    }
}

/// Folds `bumps` into an empty spectrum and returns the playback buffer.
///
/// # Errors
/// - If a bump lies outside the spectrum
pub fn render_tone(
    bumps: &[BumpArg],
    strip: StripGeometry,
    repetitions: usize,
    gain: f32,
) -> anyhow::Result<Vec<f32>> {
    let editor = Editor1D::new(strip);
    let mut spectrum = Spectrum1D::new(strip.n);
    for bump in bumps {
        if bump.bin >= strip.n as f64 {
            return Err(anyhow!(
                "bin {} is outside the spectrum (0-{})",
                bump.bin,
                strip.n - 1
            ));
        }
        editor.add_bump(&mut spectrum, bump.bin, bump.amplitude, bump.sigma);
    }
    Ok(tone_buffer(&spectrum, repetitions, gain))
}

/// Writes the tone for `bumps` to `output`, and plays it when `play` is set.
///
/// # Errors
/// - If the configuration cannot be loaded
/// - If a bump lies outside the spectrum
/// - If the WAV file cannot be written or playback fails
pub async fn handle_synth(
    bumps: Vec<BumpArg>,
    output: PathBuf,
    repetitions: Option<usize>,
    play: bool,
) -> Result<(), anyhow::Error> {
    let config = PaintConfig::load()?;
    let repetitions = repetitions.unwrap_or(config.audio.repetitions);
    tracing::info!(
        "Synthesizing {} bump(s), {} repetitions -> {}",
        bumps.len(),
        repetitions,
        output.display()
    );

    let samples = render_tone(&bumps, config.wave.geometry(), repetitions, config.audio.gain)?;
    audio::write_wav(&output, &samples, config.audio.sample_rate)?;
    eprintln!(
        "Wrote {} samples ({:.2}s at {}Hz) to {}",
        samples.len(),
        samples.len() as f32 / config.audio.sample_rate as f32,
        config.audio.sample_rate,
        output.display()
    );

    if play {
        let mut player = TonePlayer::new(config.audio.device.clone());
        player.play(samples)?;
        if let Some(rate) = player.sample_rate() {
            tracing::debug!("Device plays at {rate}Hz");
        }
        while player.is_playing() {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }
    Ok(())
}
