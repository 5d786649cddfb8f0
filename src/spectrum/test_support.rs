//! Shared helpers for the spectrum tests: seeded signals and reference transforms.

use super::transform::Direction;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rustfft::{num_complex::Complex, FftPlanner};
use std::f64::consts::PI;

/// Seeded random `(re, im)` channels with values in `[-1, 1)`.
pub fn random_signal(len: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let re = (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let im = (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect();
    (re, im)
}

pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc.max(v.abs()))
}

pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len());
    a.iter().zip(b).fold(0.0, |acc, (x, y)| acc.max((x - y).abs()))
}

/// O(n^2) textbook DFT. Unnormalized in both directions.
pub fn naive_dft(re: &[f64], im: &[f64], direction: Direction) -> (Vec<f64>, Vec<f64>) {
    let n = re.len();
    let sign = match direction {
        Direction::Forward => -1.0,
        Direction::Inverse => 1.0,
    };
    let mut out_re = vec![0.0; n];
    let mut out_im = vec![0.0; n];
    for k in 0..n {
        for t in 0..n {
            let (sin, cos) = (sign * 2.0 * PI * (k * t) as f64 / n as f64).sin_cos();
            out_re[k] += re[t] * cos - im[t] * sin;
            out_im[k] += re[t] * sin + im[t] * cos;
        }
    }
    (out_re, out_im)
}

/// Separable 2D transform computed with rustfft, inverse scaled by `1/(side*side)`.
pub fn rustfft_2d(re: &[f64], im: &[f64], side: usize, direction: Direction) -> (Vec<f64>, Vec<f64>) {
    let mut planner = FftPlanner::<f64>::new();
    let fft = match direction {
        Direction::Forward => planner.plan_fft_forward(side),
        Direction::Inverse => planner.plan_fft_inverse(side),
    };

    let mut grid: Vec<Complex<f64>> = re
        .iter()
        .zip(im)
        .map(|(&r, &i)| Complex::new(r, i))
        .collect();

    for row in grid.chunks_exact_mut(side) {
        fft.process(row);
    }

    let mut column = vec![Complex::new(0.0, 0.0); side];
    for x in 0..side {
        for y in 0..side {
            column[y] = grid[y * side + x];
        }
        fft.process(&mut column);
        for y in 0..side {
            grid[y * side + x] = column[y];
        }
    }

    let factor = match direction {
        Direction::Forward => 1.0,
        Direction::Inverse => 1.0 / (side * side) as f64,
    };
    grid.iter().map(|c| (c.re * factor, c.im * factor)).unzip()
}
