//! Complex sample storage shared by the transform, the shift operator and the editor.
//!
//! A field is two equally long channels of real numbers, one holding the real
//! parts and one the imaginary parts. Lengths are always powers of two; 2D
//! fields store a `side x side` grid in row-major order.

use super::shift::{shift_1d, shift_2d};

/// Two equal-length channels of `f64` samples (real and imaginary parts).
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexField {
    re: Vec<f64>,
    im: Vec<f64>,
}

impl ComplexField {
    /// Creates an all-zero field of `len` samples.
    ///
    /// # Panics
    /// If `len` is not a power of two.
    pub fn zeros(len: usize) -> Self {
        assert!(
            len.is_power_of_two(),
            "field length {len} is not a power of two"
        );
        Self {
            re: vec![0.0; len],
            im: vec![0.0; len],
        }
    }

    /// Builds a field from existing channels.
    ///
    /// # Panics
    /// If the channels differ in length or the length is not a power of two.
    #[cfg(test)]
    pub fn from_parts(re: Vec<f64>, im: Vec<f64>) -> Self {
        assert_eq!(re.len(), im.len(), "real and imaginary channels differ in length");
        assert!(
            re.len().is_power_of_two(),
            "field length {} is not a power of two",
            re.len()
        );
        Self { re, im }
    }

    pub fn len(&self) -> usize {
        self.re.len()
    }

    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }

    pub fn re(&self) -> &[f64] {
        &self.re
    }

    #[cfg(test)]
    pub fn im(&self) -> &[f64] {
        &self.im
    }

    /// Mutable access to both channels at once.
    pub fn channels_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        (&mut self.re, &mut self.im)
    }

    /// Consumes the field and returns `(re, im)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.re, self.im)
    }

    /// Zeroes both channels, keeping the length.
    pub fn clear(&mut self) {
        self.re.fill(0.0);
        self.im.fill(0.0);
    }

    /// True when every sample in both channels is exactly zero.
    #[cfg(test)]
    pub fn is_zero(&self) -> bool {
        self.re.iter().chain(self.im.iter()).all(|&v| v == 0.0)
    }

    /// Returns a new field rotated by half its length (DC moves to the middle).
    pub fn shifted_1d(&self) -> Self {
        Self {
            re: shift_1d(&self.re),
            im: shift_1d(&self.im),
        }
    }

    /// Returns a new field with both axes of the `side x side` grid rotated by `side / 2`.
    pub fn shifted_2d(&self, side: usize) -> Self {
        Self {
            re: shift_2d(&self.re, side),
            im: shift_2d(&self.im, side),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_and_clear() {
        let mut field = ComplexField::from_parts(vec![1.0, 2.0], vec![3.0, 4.0]);
        assert!(!field.is_zero());
        field.clear();
        assert!(field.is_zero());
        assert_eq!(field.len(), 2);
        assert_eq!(ComplexField::zeros(8).len(), 8);
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn test_rejects_non_power_of_two() {
        ComplexField::zeros(6);
    }

    #[test]
    #[should_panic(expected = "differ in length")]
    fn test_rejects_mismatched_channels() {
        ComplexField::from_parts(vec![0.0; 4], vec![0.0; 2]);
    }

    #[test]
    fn test_shifted_copy_leaves_source_alone() {
        let field = ComplexField::from_parts(vec![0.0, 1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0, 7.0]);
        let shifted = field.shifted_1d();
        assert_eq!(shifted.re(), &[2.0, 3.0, 0.0, 1.0]);
        assert_eq!(shifted.im(), &[6.0, 7.0, 4.0, 5.0]);
        assert_eq!(field.re(), &[0.0, 1.0, 2.0, 3.0]);
    }
}
