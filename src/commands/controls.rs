//! Pieces shared by the two editor commands.

use crate::config::PaintConfig;
use crate::spectrum::sigma_from_slider;
use crate::ui::error;
use std::time::Duration;

/// Input poll timeout while no tick is scheduled.
pub(crate) const IDLE_POLL: Duration = Duration::from_millis(100);

/// Loads the configuration, showing failures on the error screen.
pub(crate) fn load_config() -> anyhow::Result<PaintConfig> {
    PaintConfig::load().map_err(|err| {
        error::report(
            "Configuration Error",
            "Please check your ~/.config/fourierpaint/fourierpaint.toml file and try again.",
            err,
        )
    })
}

/// Integer sigma slider, `1..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SigmaSlider {
    value: u32,
    max: u32,
}

impl SigmaSlider {
    pub(crate) fn new(value: u32, max: u32) -> Self {
        let max = max.max(1);
        Self {
            value: value.clamp(1, max),
            max,
        }
    }

    pub(crate) fn value(&self) -> u32 {
        self.value
    }

    pub(crate) fn max(&self) -> u32 {
        self.max
    }

    /// Returns whether the value changed.
    pub(crate) fn raise(&mut self) -> bool {
        let before = self.value;
        self.value = (self.value + 1).min(self.max);
        before != self.value
    }

    /// Returns whether the value changed.
    pub(crate) fn lower(&mut self) -> bool {
        let before = self.value;
        self.value = self.value.saturating_sub(1).max(1);
        before != self.value
    }

    pub(crate) fn sigma(&self, sigma_scale: f64) -> f64 {
        sigma_from_slider(f64::from(self.value), sigma_scale)
    }
}
