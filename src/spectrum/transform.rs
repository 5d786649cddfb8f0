//! Radix-2 discrete Fourier transform over power-of-two lengths.
//!
//! The butterfly kernel is an in-place bit-reversal Cooley-Tukey and is left
//! unnormalized. Normalization happens exactly once, at the public entry points,
//! and only on the inverse direction: `1/n` in [`transform_1d`] and `1/(side*side)`
//! in [`transform_2d`]. The 2D transform calls the raw kernel, never
//! [`transform_1d`], so the scale is never applied twice.

use std::f64::consts::PI;

/// Transform direction. Forward uses twiddles `exp(-2*pi*i*k/n)`, inverse `exp(+2*pi*i*k/n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Inverse,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Self::Forward => -1.0,
            Self::Inverse => 1.0,
        }
    }
}

/// In-place 1D transform of `(re, im)`.
///
/// # Panics
/// If the channels differ in length or the length is not a power of two.
pub fn transform_1d(re: &mut [f64], im: &mut [f64], direction: Direction) {
    check_channels(re, im);
    butterfly(re, im, direction);
    if direction == Direction::Inverse {
        scale(re, im, 1.0 / re.len() as f64);
    }
}

/// In-place separable 2D transform of a row-major `side x side` grid.
///
/// Rows first, then columns, for both directions.
///
/// # Panics
/// If the channels differ in length, do not hold `side * side` samples, or
/// `side` is not a power of two.
pub fn transform_2d(re: &mut [f64], im: &mut [f64], side: usize, direction: Direction) {
    assert!(side.is_power_of_two(), "grid side {side} is not a power of two");
    check_channels(re, im);
    assert_eq!(re.len(), side * side, "grid of {} samples is not {side}x{side}", re.len());

    for (row_re, row_im) in re.chunks_exact_mut(side).zip(im.chunks_exact_mut(side)) {
        butterfly(row_re, row_im, direction);
    }

    let mut col_re = vec![0.0; side];
    let mut col_im = vec![0.0; side];
    for x in 0..side {
        for y in 0..side {
            col_re[y] = re[y * side + x];
            col_im[y] = im[y * side + x];
        }
        butterfly(&mut col_re, &mut col_im, direction);
        for y in 0..side {
            re[y * side + x] = col_re[y];
            im[y * side + x] = col_im[y];
        }
    }

    if direction == Direction::Inverse {
        scale(re, im, 1.0 / (side * side) as f64);
    }
}

fn check_channels(re: &[f64], im: &[f64]) {
    assert_eq!(re.len(), im.len(), "real and imaginary channels differ in length");
    assert!(
        re.len().is_power_of_two(),
        "transform length {} is not a power of two",
        re.len()
    );
}

fn scale(re: &mut [f64], im: &mut [f64], factor: f64) {
    for v in re.iter_mut().chain(im.iter_mut()) {
        *v *= factor;
    }
}

/// Unnormalized radix-2 kernel. Callers guarantee a power-of-two length.
fn butterfly(re: &mut [f64], im: &mut [f64], direction: Direction) {
    let n = re.len();
    if n <= 1 {
        return;
    }

    // Reorder so each stage combines adjacent even/odd halves.
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            re.swap(i, j);
            im.swap(i, j);
        }
    }

    let sign = direction.sign();
    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let step = sign * 2.0 * PI / len as f64;
        for k in 0..half {
            let (sin, cos) = (step * k as f64).sin_cos();
            for start in (0..n).step_by(len) {
                let even = start + k;
                let odd = even + half;
                let t_re = cos * re[odd] - sin * im[odd];
                let t_im = sin * re[odd] + cos * im[odd];
                re[odd] = re[even] - t_re;
                im[odd] = im[even] - t_im;
                re[even] += t_re;
                im[even] += t_im;
            }
        }
        len <<= 1;
    }
}
