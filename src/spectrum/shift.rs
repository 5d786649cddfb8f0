//! Frequency centering.
//!
//! Rotates a spectrum by half its size so the zero-frequency bin lands in the
//! middle. For even sizes the rotation is its own inverse, so the same
//! functions shift and unshift.

/// Moves index `i` to `(i + n/2) mod n`. Returns a new vector.
pub fn shift_1d(values: &[f64]) -> Vec<f64> {
    let half = values.len() / 2;
    let mut out = Vec::with_capacity(values.len());
    out.extend_from_slice(&values[half..]);
    out.extend_from_slice(&values[..half]);
    out
}

/// Moves `(x, y)` to `((x + side/2) mod side, (y + side/2) mod side)` on a
/// row-major `side x side` grid. Returns a new vector.
///
/// # Panics
/// If `values` does not hold exactly `side * side` samples.
pub fn shift_2d(values: &[f64], side: usize) -> Vec<f64> {
    assert_eq!(
        values.len(),
        side * side,
        "grid of {} samples is not {side}x{side}",
        values.len()
    );
    let half = side / 2;
    let mut out = vec![0.0; values.len()];
    for (y, row) in values.chunks_exact(side.max(1)).enumerate() {
        let dest_row = (y + half) % side;
        let dest = &mut out[dest_row * side..(dest_row + 1) * side];
        dest[half..].copy_from_slice(&row[..side - half]);
        dest[..half].copy_from_slice(&row[side - half..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_1d_moves_dc_to_middle() {
        let values = [10.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let shifted = shift_1d(&values);
        assert_eq!(shifted[4], 10.0);
        assert_eq!(shifted, vec![4.0, 5.0, 6.0, 7.0, 10.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_shift_2d_moves_corner_to_center() {
        let side = 4;
        let mut values = vec![0.0; side * side];
        values[0] = 1.0;
        values[1] = 2.0; // (x=1, y=0)
        let shifted = shift_2d(&values, side);
        assert_eq!(shifted[2 * side + 2], 1.0);
        assert_eq!(shifted[2 * side + 3], 2.0);
        assert_eq!(shifted.iter().filter(|&&v| v != 0.0).count(), 2);
    }

    #[test]
    fn test_shift_1d_is_self_inverse() {
        for n in [2usize, 4, 8, 64, 2048] {
            let values: Vec<f64> = (0..n).map(|i| i as f64 * 0.5 - 3.0).collect();
            assert_eq!(shift_1d(&shift_1d(&values)), values, "n = {n}");
        }
    }

    #[test]
    fn test_shift_2d_is_self_inverse() {
        for side in [2usize, 4, 16, 128] {
            let values: Vec<f64> = (0..side * side).map(|i| (i as f64).sin()).collect();
            assert_eq!(shift_2d(&shift_2d(&values, side), side), values, "side = {side}");
        }
    }

    #[test]
    fn test_shift_handles_single_sample() {
        assert_eq!(shift_1d(&[7.0]), vec![7.0]);
        assert_eq!(shift_2d(&[7.0], 1), vec![7.0]);
    }
}
