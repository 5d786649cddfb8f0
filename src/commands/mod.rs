//! Application command handlers for fourierpaint.
//!
//! # Commands
//! - `paint`: 2D spectrum editor (default)
//! - `wave`: 1D spectrum editor with playback
//! - `synth`: render 1D bumps to a WAV file without the UI
//! - `config`: Open configuration file in user's preferred editor
//! - `list_devices`: List available audio output devices
//! - `logs`: Display recent log entries

mod controls;

pub mod config;
pub mod list_devices;
pub mod logs;
pub mod paint;
pub mod synth;
pub mod wave;

pub use config::handle_config;
pub use list_devices::handle_list_devices;
pub use logs::handle_logs;
pub use paint::handle_paint;
pub use synth::{handle_synth, BumpArg};
pub use wave::handle_wave;
