//! Mapping between the magnified edit view and full-resolution frequency bins.
//!
//! The 2D edit view shows a `crop_n x crop_n` window cut from the middle of
//! the centered `full_n x full_n` spectrum, magnified to `image_n x image_n`
//! pixels. The 1D strip shows the first `image_n` bins of the centered
//! spectrum, one bin per pixel.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// Geometry of the 2D spectrum and its magnified crop view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewGeometry {
    /// Side of the full frequency grid
    pub full_n: usize,
    /// `full_n / image_scale` is the side of the displayed images
    pub image_scale: usize,
    /// `full_n / crop_scale` is the side of the editable crop window
    pub crop_scale: usize,
}

impl Default for ViewGeometry {
    fn default() -> Self {
        Self {
            full_n: 512,
            image_scale: 2,
            crop_scale: 8,
        }
    }
}

impl ViewGeometry {
    /// Checks that every derived size is a whole, even, power-of-two number of bins.
    ///
    /// # Errors
    /// - If `full_n` is not a power of two or smaller than 2
    /// - If a scale is zero, not a power of two, or does not leave at least 2 bins
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.full_n < 2 || !self.full_n.is_power_of_two() {
            return Err(anyhow!(
                "grid size {} must be a power of two and at least 2",
                self.full_n
            ));
        }
        for (name, scale) in [("image_scale", self.image_scale), ("crop_scale", self.crop_scale)] {
            if scale == 0 || !scale.is_power_of_two() || self.full_n / scale < 2 {
                return Err(anyhow!(
                    "{name} {scale} must be a power of two that leaves at least 2 of {} bins",
                    self.full_n
                ));
            }
        }
        Ok(())
    }

    /// Side of the displayed images in pixels.
    pub fn image_n(&self) -> usize {
        self.full_n / self.image_scale
    }

    /// Side of the editable crop window in bins.
    pub fn crop_n(&self) -> usize {
        self.full_n / self.crop_scale
    }

    /// First bin of the crop window, offset by half a bin so pixel
    /// coordinates land on bin centers.
    pub fn nmin(&self) -> f64 {
        (self.full_n - self.crop_n()) as f64 / 2.0 + 0.5
    }

    /// Maps a view pixel to a centered bin of the full grid.
    ///
    /// Coordinates outside the view map to bins outside the crop window (or
    /// outside the grid); the result is a bump center, not an index.
    pub fn map_pointer(&self, px: f64, py: f64) -> (i64, i64) {
        (self.map_axis(px), self.map_axis(py))
    }

    fn map_axis(&self, p: f64) -> i64 {
        self.crop_bin_to_full(p * self.image_scale as f64 / self.crop_scale as f64)
    }

    /// Bin sampled by display pixel `i` when rendering the crop (nearest neighbour).
    pub fn crop_index(&self, i: usize) -> usize {
        self.crop_bin_to_full(i as f64 * self.crop_n() as f64 / self.image_n() as f64) as usize
    }

    /// Maps a bin offset inside the crop window to the full grid.
    pub fn crop_bin_to_full(&self, c: f64) -> i64 {
        (c + self.nmin()).floor() as i64
    }
}

/// Geometry of the 1D spectrum strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripGeometry {
    /// Length of the 1D spectrum
    pub n: usize,
    /// Number of centered bins shown, one per pixel
    pub image_n: usize,
}

impl Default for StripGeometry {
    fn default() -> Self {
        Self { n: 2048, image_n: 512 }
    }
}

impl StripGeometry {
    /// # Errors
    /// - If `n` is not a power of two or smaller than 2
    /// - If `image_n` is zero or larger than `n`
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.n < 2 || !self.n.is_power_of_two() {
            return Err(anyhow!("wave size {} must be a power of two and at least 2", self.n));
        }
        if self.image_n == 0 || self.image_n > self.n {
            return Err(anyhow!(
                "strip width {} must be between 1 and {}",
                self.image_n,
                self.n
            ));
        }
        Ok(())
    }

    /// Maps a strip pixel to a centered bin; no scaling is applied.
    pub fn map_pointer(&self, px: f64) -> i64 {
        px.floor() as i64
    }
}

/// Converts a slider position to a Gaussian spread.
pub fn sigma_from_slider(slider: f64, sigma_scale: f64) -> f64 {
    slider / sigma_scale
}
