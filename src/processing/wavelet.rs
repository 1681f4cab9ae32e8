//! Wavelet-style shrinkage built from cascaded moving averages.
//!
//! Not a discrete wavelet transform: the "approximation" is `level` passes of
//! an edge-preserving moving average with window `2^level`, halving (floor 3)
//! after every pass, and the "detail" is whatever the smoothing removed.

use super::windowed::moving_average;

/// Shrink `detail` toward zero by `threshold`, keeping its sign.
/// Returns 0 when the magnitude does not exceed the threshold.
pub fn soft_threshold(detail: f64, threshold: f64) -> f64 {
    let magnitude = detail.abs();
    if magnitude > threshold {
        detail.signum() * (magnitude - threshold)
    } else {
        0.0
    }
}

/// Smooth `data` through `level` cascaded moving averages and add back the
/// part of each residual that exceeds `threshold * max|residual|`.
///
/// Levels past the width of `usize` start from `usize::MAX`; any window
/// wider than the data leaves it untouched.
pub fn wavelet_denoising(data: &[f64], threshold: f64, level: u32) -> Vec<f64> {
    let mut smoothed = data.to_vec();
    let mut window_size = 1usize.checked_shl(level).unwrap_or(usize::MAX);
    for _ in 0..level {
        smoothed = moving_average(&smoothed, window_size, true);
        window_size = (window_size / 2).max(3);
    }

    let residual: Vec<f64> = data.iter().zip(&smoothed).map(|(o, s)| o - s).collect();
    let max_deviation = residual.iter().fold(0.0_f64, |acc, r| acc.max(r.abs()));
    let scaled_threshold = threshold * max_deviation;

    smoothed
        .iter()
        .zip(&residual)
        .map(|(s, &r)| s + soft_threshold(r, scaled_threshold))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn soft_threshold_shrinks_and_keeps_sign() {
        assert_eq!(soft_threshold(5.0, 2.0), 3.0);
        assert_eq!(soft_threshold(-5.0, 2.0), -3.0);
        assert_eq!(soft_threshold(1.5, 2.0), 0.0);
        assert_eq!(soft_threshold(2.0, 2.0), 0.0);
    }

    #[test]
    fn zero_threshold_restores_input() {
        let data: Vec<f64> = (0..40).map(|i| ((i * 7) % 5) as f64).collect();
        let out = wavelet_denoising(&data, 0.0, 3);
        for (o, d) in out.iter().zip(&data) {
            assert_abs_diff_eq!(*o, *d, epsilon = 1e-12);
        }
    }

    #[test]
    fn full_threshold_returns_cascade() {
        let data: Vec<f64> = (0..40).map(|i| ((i * 7) % 5) as f64).collect();
        let out = wavelet_denoising(&data, 1.0, 2);
        // Windows 4 then max(3, 2) = 3.
        let expected = moving_average(&moving_average(&data, 4, true), 3, true);
        assert_eq!(out, expected);
    }

    #[test]
    fn edges_are_preserved() {
        let data: Vec<f64> = (0..30).map(|i| (i as f64 * 0.7).sin()).collect();
        let out = wavelet_denoising(&data, 0.5, 3);
        // Windows 8, 4, 3: only the outermost sample on each side is never
        // rewritten by any pass.
        assert_eq!(out[0], data[0]);
        assert_eq!(out[29], data[29]);
        assert_ne!(out[2], data[2]);
    }

    #[test]
    fn short_and_empty_inputs() {
        assert!(wavelet_denoising(&[], 0.1, 3).is_empty());
        assert_eq!(wavelet_denoising(&[1.0, 2.0], 0.1, 3), vec![1.0, 2.0]);
    }

    #[test]
    fn deep_levels_do_not_overflow() {
        assert_eq!(wavelet_denoising(&[1.0, 2.0, 3.0], 0.1, 64), vec![1.0, 2.0, 3.0]);
        assert_eq!(wavelet_denoising(&[1.0, 2.0, 3.0], 0.1, 200), vec![1.0, 2.0, 3.0]);

        let data: Vec<f64> = (0..40).map(|i| ((i * 7) % 5) as f64).collect();
        let out = wavelet_denoising(&data, 0.0, 17);
        for (o, d) in out.iter().zip(&data) {
            assert_abs_diff_eq!(*o, *d, epsilon = 1e-12);
        }
        let smoothed = wavelet_denoising(&data, 1.0, 17);
        assert_eq!(smoothed.len(), data.len());
        assert_ne!(smoothed, data);
    }

    #[test]
    fn constant_input_is_fixed_point() {
        let data = vec![9.0; 25];
        assert_eq!(wavelet_denoising(&data, 0.3, 4), data);
    }
}
