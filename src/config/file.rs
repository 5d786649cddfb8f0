//! Configuration file management for fourierpaint.
//!
//! Settings live in a TOML file in the user's config directory. Every field
//! has a default, so a partial file (or a missing section) still loads.

use crate::spectrum::{StripGeometry, ViewGeometry};
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 2D spectrum and edit view settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridConfig {
    /// Side of the full frequency grid (power of two)
    #[serde(default = "default_full_n")]
    pub full_n: usize,
    /// Displayed images are `full_n / image_scale` pixels wide
    #[serde(default = "default_image_scale")]
    pub image_scale: usize,
    /// The edit view shows the central `full_n / crop_scale` bins
    #[serde(default = "default_crop_scale")]
    pub crop_scale: usize,
    /// Sigma is the slider value divided by this
    #[serde(default = "default_sigma_scale")]
    pub sigma_scale: f64,
}

impl GridConfig {
    pub fn geometry(&self) -> ViewGeometry {
        ViewGeometry {
            full_n: self.full_n,
            image_scale: self.image_scale,
            crop_scale: self.crop_scale,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            full_n: default_full_n(),
            image_scale: default_image_scale(),
            crop_scale: default_crop_scale(),
            sigma_scale: default_sigma_scale(),
        }
    }
}

/// 1D spectrum strip settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaveConfig {
    /// Length of the 1D spectrum (power of two)
    #[serde(default = "default_wave_n")]
    pub n: usize,
    /// Number of centered bins shown in the strip
    #[serde(default = "default_wave_image_n")]
    pub image_n: usize,
    #[serde(default = "default_sigma_scale")]
    pub sigma_scale: f64,
}

impl WaveConfig {
    pub fn geometry(&self) -> StripGeometry {
        StripGeometry {
            n: self.n,
            image_n: self.image_n,
        }
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            n: default_wave_n(),
            image_n: default_wave_image_n(),
            sigma_scale: default_sigma_scale(),
        }
    }
}

/// Press-and-hold painting behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaintingConfig {
    /// Amplitude added on every tick while the mouse button is held
    #[serde(default = "default_amplitude_step")]
    pub amplitude_step: f64,
    /// Milliseconds between ticks (16 is roughly one display refresh)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Initial sigma slider position
    #[serde(default = "default_sigma_slider")]
    pub sigma_slider: u32,
    /// Largest sigma slider position
    #[serde(default = "default_sigma_slider_max")]
    pub sigma_slider_max: u32,
}

impl PaintingConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for PaintingConfig {
    fn default() -> Self {
        Self {
            amplitude_step: default_amplitude_step(),
            tick_interval_ms: default_tick_interval_ms(),
            sigma_slider: default_sigma_slider(),
            sigma_slider_max: default_sigma_slider_max(),
        }
    }
}

/// Audio playback and export settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioConfig {
    /// Output device. Options:
    /// - "default" for system default device
    /// - numeric index (0, 1, 2, etc.) from `fourierpaint list-devices`
    /// - device name from `fourierpaint list-devices`
    #[serde(default = "default_device")]
    pub device: String,
    /// Sample rate written into exported WAV files
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// How many periods of the waveform one playback contains
    #[serde(default = "default_repetitions")]
    pub repetitions: usize,
    /// Peak level after normalization (0.0-1.0)
    #[serde(default = "default_gain")]
    pub gain: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            sample_rate: default_sample_rate(),
            repetitions: default_repetitions(),
            gain: default_gain(),
        }
    }
}

fn default_full_n() -> usize {
    512
}

fn default_image_scale() -> usize {
    2
}

fn default_crop_scale() -> usize {
    8
}

fn default_sigma_scale() -> f64 {
    20.0
}

fn default_wave_n() -> usize {
    2048
}

fn default_wave_image_n() -> usize {
    512
}

fn default_amplitude_step() -> f64 {
    crate::spectrum::session::AMPLITUDE_STEP
}

fn default_tick_interval_ms() -> u64 {
    16
}

fn default_sigma_slider() -> u32 {
    20
}

fn default_sigma_slider_max() -> u32 {
    100
}

fn default_device() -> String {
    "default".to_string()
}

fn default_sample_rate() -> u32 {
    44100
}

fn default_repetitions() -> usize {
    crate::spectrum::readout::TONE_REPETITIONS
}

fn default_gain() -> f32 {
    crate::spectrum::readout::TONE_GAIN
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaintConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub wave: WaveConfig,
    #[serde(default)]
    pub painting: PaintingConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

impl PaintConfig {
    /// Loads and validates configuration from the user's config directory.
    ///
    /// # Errors
    /// - If the config directory cannot be determined
    /// - If the config file cannot be read
    /// - If the TOML is malformed or describes an unusable geometry
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Loads and validates configuration from `path`.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::parse(&content)?;
        Ok(config)
    }

    /// Parses and validates a TOML document.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: PaintConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the engine cannot run with.
    ///
    /// # Errors
    /// - If either geometry is invalid
    /// - If a sigma scale, the tick interval, or the slider range is not positive
    /// - If the gain is outside 0.0-1.0
    pub fn validate(&self) -> anyhow::Result<()> {
        self.grid.geometry().validate()?;
        self.wave.geometry().validate()?;

        for scale in [self.grid.sigma_scale, self.wave.sigma_scale] {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(anyhow!("sigma_scale {scale} must be a positive number"));
            }
        }
        if !self.painting.amplitude_step.is_finite() {
            return Err(anyhow!("amplitude_step must be a finite number"));
        }
        if self.painting.tick_interval_ms == 0 {
            return Err(anyhow!("tick_interval_ms must be at least 1"));
        }
        if self.painting.sigma_slider_max == 0 {
            return Err(anyhow!("sigma_slider_max must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.audio.gain) {
            return Err(anyhow!("gain {} must be between 0.0 and 1.0", self.audio.gain));
        }
        Ok(())
    }
}

/// Directory holding fourierpaint's config file.
///
/// # Errors
/// - If the home directory cannot be determined
pub fn config_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home.join(".config").join("fourierpaint"))
}

/// Path to the config file; creates the directory if needed.
///
/// # Errors
/// - If the home directory cannot be determined
/// - If the config directory cannot be created
pub fn config_path() -> anyhow::Result<PathBuf> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir)
        .map_err(|e| anyhow!("Failed to create config directory: {e}"))?;
    Ok(dir.join("fourierpaint.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_default_matches_code_defaults() {
        let config = PaintConfig::parse(crate::setup::DEFAULT_CONFIG).unwrap();
        assert_eq!(config, PaintConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = PaintConfig::parse("[grid]\nfull_n = 256\n\n[audio]\ngain = 0.5\n").unwrap();
        assert_eq!(config.grid.full_n, 256);
        assert_eq!(config.grid.crop_scale, 8);
        assert_eq!(config.audio.gain, 0.5);
        assert_eq!(config.audio.device, "default");
        assert_eq!(config.wave, WaveConfig::default());
    }

    #[test]
    fn test_version_line_is_ignored() {
        let config = PaintConfig::parse("config_version = \"0.1.0\"\n").unwrap();
        assert_eq!(config, PaintConfig::default());
    }

    #[test]
    fn test_rejects_unusable_settings() {
        assert!(PaintConfig::parse("[grid]\nfull_n = 300\n").is_err());
        assert!(PaintConfig::parse("[wave]\nimage_n = 0\n").is_err());
        assert!(PaintConfig::parse("[wave]\nsigma_scale = 0.0\n").is_err());
        assert!(PaintConfig::parse("[painting]\ntick_interval_ms = 0\n").is_err());
        assert!(PaintConfig::parse("[audio]\ngain = 1.5\n").is_err());
        assert!(PaintConfig::parse("[grid\n").is_err());
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = PaintConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(PaintConfig::parse(&text).unwrap(), config);
    }
}
