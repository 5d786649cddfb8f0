//! Frequency state and the Gaussian bump editor.
//!
//! A spectrum is stored in natural layout (DC at index 0, or at the top-left
//! corner in 2D). Each bump is applied to a centered copy and shifted back,
//! so edits accumulate on whatever the state already holds.
//!
//! Only the real channel is ever written. The edited spectrum is generally not
//! conjugate-symmetric, so its reconstruction is complex; the tool shows and
//! plays the real part only.

use super::field::ComplexField;
use super::view::{StripGeometry, ViewGeometry};

/// Smallest spread used in the Gaussian; smaller positive or zero values are raised to it.
pub const MIN_SIGMA: f64 = 1e-3;

/// One additive perturbation, expressed in centered bin coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianBump {
    pub center_x: f64,
    pub center_y: f64,
    pub amplitude: f64,
    pub sigma: f64,
}

impl GaussianBump {
    /// # Panics
    /// If `amplitude` or `sigma` is not finite.
    pub fn new(center_x: f64, center_y: f64, amplitude: f64, sigma: f64) -> Self {
        assert!(amplitude.is_finite(), "bump amplitude {amplitude} is not finite");
        Self {
            center_x,
            center_y,
            amplitude,
            sigma: effective_sigma(sigma),
        }
    }

    /// Bump height at squared distance `d2` from its center.
    pub fn value_at(&self, d2: f64) -> f64 {
        self.amplitude * (-d2 / (2.0 * self.sigma * self.sigma)).exp()
    }
}

/// Raises a spread below [`MIN_SIGMA`] (including zero and negatives) to the floor.
///
/// # Panics
/// If `sigma` is NaN or infinite.
pub fn effective_sigma(sigma: f64) -> f64 {
    assert!(sigma.is_finite(), "bump sigma {sigma} is not finite");
    if sigma < MIN_SIGMA {
        tracing::warn!("Sigma {} below floor, using {}", sigma, MIN_SIGMA);
        MIN_SIGMA
    } else {
        sigma
    }
}

/// Editable 2D spectrum of `side x side` bins.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum2D {
    side: usize,
    field: ComplexField,
}

impl Spectrum2D {
    /// Creates an all-zero spectrum.
    ///
    /// # Panics
    /// If `side` is not a power of two.
    pub fn new(side: usize) -> Self {
        Self {
            side,
            field: ComplexField::zeros(side * side),
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Current state in natural layout.
    pub fn field(&self) -> &ComplexField {
        &self.field
    }

    /// Centered copy of the current state.
    pub fn centered(&self) -> ComplexField {
        self.field.shifted_2d(self.side)
    }

    /// Zeroes both channels.
    pub fn clear(&mut self) {
        self.field.clear();
    }

    /// Adds `bump` (centered coordinates) to the real channel.
    pub fn apply(&mut self, bump: &GaussianBump) {
        let side = self.side;
        let mut centered = self.centered();
        let (re, _) = centered.channels_mut();
        for (y, row) in re.chunks_exact_mut(side).enumerate() {
            let dy = y as f64 - bump.center_y;
            for (x, value) in row.iter_mut().enumerate() {
                let dx = x as f64 - bump.center_x;
                *value += bump.value_at(dx * dx + dy * dy);
            }
        }
        self.field = centered.shifted_2d(side);
    }
}

/// Editable 1D spectrum of `n` bins.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum1D {
    field: ComplexField,
}

impl Spectrum1D {
    /// # Panics
    /// If `n` is not a power of two.
    pub fn new(n: usize) -> Self {
        Self {
            field: ComplexField::zeros(n),
        }
    }

    pub fn len(&self) -> usize {
        self.field.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field.is_empty()
    }

    pub fn field(&self) -> &ComplexField {
        &self.field
    }

    pub fn centered(&self) -> ComplexField {
        self.field.shifted_1d()
    }

    pub fn clear(&mut self) {
        self.field.clear();
    }

    /// Adds `bump` to the real channel; only `center_x` is used.
    pub fn apply(&mut self, bump: &GaussianBump) {
        let mut centered = self.centered();
        let (re, _) = centered.channels_mut();
        for (k, value) in re.iter_mut().enumerate() {
            let dk = k as f64 - bump.center_x;
            *value += bump.value_at(dk * dk);
        }
        self.field = centered.shifted_1d();
    }
}

/// Applies pointer-driven bumps to a [`Spectrum2D`].
#[derive(Debug, Clone, Copy)]
pub struct Editor2D {
    geometry: ViewGeometry,
}

impl Editor2D {
    pub fn new(geometry: ViewGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &ViewGeometry {
        &self.geometry
    }

    /// Deposits a bump at the bin under view pixel `(ui_x, ui_y)`.
    ///
    /// # Panics
    /// If the amplitude or sigma is not finite, or the state does not match
    /// the editor geometry. Nothing is mutated in that case.
    pub fn add_bump(&self, state: &mut Spectrum2D, ui_x: f64, ui_y: f64, amplitude: f64, sigma: f64) {
        assert_eq!(
            state.side(),
            self.geometry.full_n,
            "spectrum side does not match the view geometry"
        );
        let (fx, fy) = self.geometry.map_pointer(ui_x, ui_y);
        let bump = GaussianBump::new(fx as f64, fy as f64, amplitude, sigma);
        tracing::trace!("2D bump at bin ({}, {}) amp={:.3} sigma={:.3}", fx, fy, amplitude, bump.sigma);
        state.apply(&bump);
    }

    pub fn clear(&self, state: &mut Spectrum2D) {
        state.clear();
    }
}

/// Applies pointer-driven bumps to a [`Spectrum1D`].
#[derive(Debug, Clone, Copy)]
pub struct Editor1D {
    geometry: StripGeometry,
}

impl Editor1D {
    pub fn new(geometry: StripGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &StripGeometry {
        &self.geometry
    }

    /// Deposits a bump at the bin under strip pixel `ui_x`.
    ///
    /// # Panics
    /// If the amplitude or sigma is not finite, or the state length does not
    /// match the strip geometry.
    pub fn add_bump(&self, state: &mut Spectrum1D, ui_x: f64, amplitude: f64, sigma: f64) {
        assert_eq!(state.len(), self.geometry.n, "spectrum length does not match the strip geometry");
        let k0 = self.geometry.map_pointer(ui_x);
        let bump = GaussianBump::new(k0 as f64, 0.0, amplitude, sigma);
        tracing::trace!("1D bump at bin {} amp={:.3} sigma={:.3}", k0, amplitude, bump.sigma);
        state.apply(&bump);
    }

    pub fn clear(&self, state: &mut Spectrum1D) {
        state.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::test_support::{max_abs_diff, rustfft_2d};
    use crate::spectrum::transform::{transform_2d, Direction};

    #[test]
    fn test_localized_bump_placement_2d() {
        let mut state = Spectrum2D::new(64);
        let bump = GaussianBump::new(30.0, 34.0, 2.5, 0.1);
        state.apply(&bump);

        let centered = state.centered();
        let re = centered.re();
        assert!((re[34 * 64 + 30] - 2.5).abs() < 1e-9);
        for (i, &value) in re.iter().enumerate() {
            let (x, y) = ((i % 64) as i64, (i / 64) as i64);
            if (x - 30).abs() > 3 || (y - 34).abs() > 3 {
                assert!(value.abs() < 1e-12, "bin ({x}, {y}) touched: {value}");
            }
        }
        assert!(centered.im().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_bumps_accumulate() {
        let mut state = Spectrum2D::new(16);
        let bump = GaussianBump::new(8.0, 8.0, 1.0, 0.5);
        state.apply(&bump);
        state.apply(&bump);
        // Centered (8, 8) is natural (0, 0).
        assert!((state.field().re()[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_scenario_a_dc_bump_reconstructs_flat_field() {
        let geometry = ViewGeometry::default();
        let editor = Editor2D::new(geometry);
        let mut state = Spectrum2D::new(512);
        // View pixel (128, 128) sits on centered bin (256, 256).
        editor.add_bump(&mut state, 128.0, 128.0, 1.0, 1.0);

        let (mut re, mut im) = state.field().clone().into_parts();
        let (want_re, want_im) = rustfft_2d(&re, &im, 512, Direction::Inverse);
        transform_2d(&mut re, &mut im, 512, Direction::Inverse);

        let peak = re.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
        assert!(max_abs_diff(&re, &want_re) <= 1e-3 * peak);
        assert!(max_abs_diff(&im, &want_im) <= 1e-3 * peak);

        // A symmetric bump on DC reconstructs to a real, positive, slowly varying field.
        assert!(im.iter().all(|v| v.abs() <= 1e-9 * peak));
        assert!(re.iter().all(|&v| v > 0.0));
        for y in 0..3 {
            for x in 0..3 {
                let v = re[y * 512 + x];
                assert!((v - re[0]).abs() <= 1e-3 * re[0], "({x}, {y}) = {v}");
            }
        }
    }

    #[test]
    fn test_scenario_b_1d_bump() {
        let editor = Editor1D::new(StripGeometry { n: 2048, image_n: 512 });
        let mut state = Spectrum1D::new(2048);
        editor.add_bump(&mut state, 1024.0, 5.0, 2.0);

        let centered = state.centered();
        let re = centered.re();
        assert!((re[1024] - 5.0).abs() < 1e-12);
        for (k, &value) in re.iter().enumerate() {
            if (k as i64 - 1024).abs() > 20 {
                assert!(value.abs() < 1e-9, "bin {k} touched: {value}");
            }
        }
        // Centered 1024 is natural 0.
        assert!((state.field().re()[0] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_clear_zeroes_state() {
        let editor = Editor1D::new(StripGeometry::default());
        let mut state = Spectrum1D::new(2048);
        editor.add_bump(&mut state, 100.0, 1.0, 3.0);
        assert!(!state.field().is_zero());
        editor.clear(&mut state);
        assert!(state.field().is_zero());
        assert_eq!(state.len(), 2048);
    }

    #[test]
    fn test_non_positive_sigma_is_floored() {
        assert_eq!(effective_sigma(0.0), MIN_SIGMA);
        assert_eq!(effective_sigma(-2.0), MIN_SIGMA);
        assert_eq!(effective_sigma(0.5), 0.5);

        let mut state = Spectrum1D::new(8);
        state.apply(&GaussianBump::new(4.0, 0.0, 1.0, 0.0));
        let centered = state.centered();
        assert_eq!(centered.re()[4], 1.0);
        assert!(centered.re().iter().all(|v| v.is_finite()));
    }

    #[test]
    #[should_panic(expected = "not finite")]
    fn test_rejects_non_finite_amplitude() {
        let mut state = Spectrum1D::new(8);
        let editor = Editor1D::new(StripGeometry { n: 8, image_n: 8 });
        editor.add_bump(&mut state, 1.0, f64::NAN, 1.0);
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn test_rejects_mismatched_state() {
        let editor = Editor2D::new(ViewGeometry::default());
        let mut state = Spectrum2D::new(64);
        editor.add_bump(&mut state, 0.0, 0.0, 1.0, 1.0);
    }
}
