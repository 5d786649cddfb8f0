//! Configuration management for fourierpaint.
//!
//! Loads the TOML settings file from the user's config directory: spectrum
//! sizes, edit view scaling, painting speed and audio output.

pub mod file;

pub use file::{config_path, PaintConfig};
