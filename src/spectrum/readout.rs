//! Read-side views of a spectrum for display and playback.
//!
//! Every function here recomputes its result from the current state; nothing
//! is cached between calls.

use super::editor::{Spectrum1D, Spectrum2D};
use super::shift::{shift_1d, shift_2d};
use super::transform::{transform_1d, transform_2d, Direction};
use super::view::{StripGeometry, ViewGeometry};

/// Default number of times the waveform is repeated in a playback buffer.
pub const TONE_REPETITIONS: usize = 10;

/// Default headroom factor applied after peak normalization.
pub const TONE_GAIN: f32 = 0.9;

/// `|re|` of the centered spectrum over the crop window, magnified to `image_n x image_n`.
///
/// The imaginary channel does not contribute; edits only ever write the real one.
pub fn crop_magnitude(state: &Spectrum2D, geometry: &ViewGeometry) -> Vec<f64> {
    let side = state.side();
    let image_n = geometry.image_n();
    let centered = state.centered();
    let re = centered.re();

    let columns: Vec<usize> = (0..image_n).map(|x| geometry.crop_index(x)).collect();
    let mut out = Vec::with_capacity(image_n * image_n);
    for y in 0..image_n {
        let row = geometry.crop_index(y) * side;
        out.extend(columns.iter().map(|&x| re[row + x].abs()));
    }
    out
}

/// Real channel of the 2D inverse transform in natural (origin top-left) layout.
pub fn reconstruct_2d(state: &Spectrum2D) -> Vec<f64> {
    let (mut re, mut im) = state.field().clone().into_parts();
    transform_2d(&mut re, &mut im, state.side(), Direction::Inverse);
    re
}

/// Reconstructed image with its origin moved to the center, downsampled by
/// `image_scale` (nearest neighbour) to `image_n x image_n`.
pub fn spatial_image(state: &Spectrum2D, geometry: &ViewGeometry) -> Vec<f64> {
    let side = state.side();
    let centered = shift_2d(&reconstruct_2d(state), side);
    let image_n = geometry.image_n();
    let step = geometry.image_scale;

    let mut out = Vec::with_capacity(image_n * image_n);
    for y in 0..image_n {
        let row = y * step * side;
        out.extend((0..image_n).map(|x| centered[row + x * step]));
    }
    out
}

/// The first `image_n` bins of the centered real channel.
pub fn spectrum_strip(state: &Spectrum1D, strip: &StripGeometry) -> Vec<f64> {
    let centered = state.centered();
    centered.re()[..strip.image_n.min(centered.len())].to_vec()
}

/// Real channel of the 1D reconstruction.
///
/// The centered spectrum is fed to the inverse transform as it is displayed,
/// so strip pixel `k` becomes a component with `k` cycles per period. This
/// keeps low pixels low-pitched when the waveform is played.
pub fn reconstruct_1d(state: &Spectrum1D) -> Vec<f64> {
    let (mut re, mut im) = state.centered().into_parts();
    transform_1d(&mut re, &mut im, Direction::Inverse);
    re
}

/// Reconstruction rotated so the time origin sits in the middle.
pub fn temporal_signal(state: &Spectrum1D) -> Vec<f64> {
    shift_1d(&reconstruct_1d(state))
}

/// The first `image_n` samples of [`temporal_signal`].
pub fn temporal_strip(state: &Spectrum1D, strip: &StripGeometry) -> Vec<f64> {
    let mut signal = temporal_signal(state);
    signal.truncate(strip.image_n);
    signal
}

/// Playback buffer: the reconstruction tiled `repetitions` times, scaled so
/// its peak sits at `gain`. A silent spectrum gives a silent buffer.
pub fn tone_buffer(state: &Spectrum1D, repetitions: usize, gain: f32) -> Vec<f32> {
    let period = reconstruct_1d(state);
    let peak = peak_abs(&period);
    let peak = if peak > 0.0 { peak } else { 1.0 };
    let scale = gain as f64 / peak;

    let one: Vec<f32> = period.iter().map(|&v| (v * scale) as f32).collect();
    let mut out = Vec::with_capacity(one.len() * repetitions);
    for _ in 0..repetitions {
        out.extend_from_slice(&one);
    }
    out
}

/// Largest absolute value, 0 for an empty slice.
pub fn peak_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc.max(v.abs()))
}

/// Stretches `values` to 0..=255.
///
/// A flat input (`max == min`) keeps a scale of 1 instead of dividing by zero,
/// which maps every value to 0.
pub fn normalize_gray(values: &[f64]) -> Vec<u8> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let scale = if max > min { 255.0 / (max - min) } else { 1.0 };
    values
        .iter()
        .map(|&v| ((v - min) * scale).round().clamp(0.0, 255.0) as u8)
        .collect()
}
