//! Sliding-window filters: median, moving average, despike and adaptive.

use super::stats;
use super::window::{map_windows, BoundaryPolicy};

/// Median filter with truncated windows at the edges.
///
/// `window_size` is forced odd and at least 3. Each output sample is the
/// upper median of the in-bounds samples around it.
pub fn median_filter(data: &[f64], window_size: usize) -> Vec<f64> {
    let window_size = if window_size < 3 {
        3
    } else if window_size % 2 == 0 {
        window_size + 1
    } else {
        window_size
    };
    map_windows(data, window_size / 2, BoundaryPolicy::Truncate, |window, _| {
        stats::upper_median(window)
    })
}

/// Arithmetic mean over a centred window (minimum size 3).
///
/// With `preserve_edges` the first and last `window_size / 2` samples are
/// copied through; otherwise they are averaged over the truncated window.
pub fn moving_average(data: &[f64], window_size: usize, preserve_edges: bool) -> Vec<f64> {
    let window_size = window_size.max(3);
    let policy = if preserve_edges {
        BoundaryPolicy::SkipEdges
    } else {
        BoundaryPolicy::Truncate
    };
    map_windows(data, window_size / 2, policy, |window, _| stats::mean(window))
}

/// Replace samples further than `threshold * MAD` from their window median
/// with that median. Edge samples are never touched.
pub fn despike(data: &[f64], threshold: f64, window_size: usize) -> Vec<f64> {
    map_windows(data, window_size / 2, BoundaryPolicy::SkipEdges, |window, sample| {
        let median = stats::median(window);
        let deviation = stats::mad(window, median);
        if (sample - median).abs() > threshold * deviation {
            median
        } else {
            sample
        }
    })
}

/// Blend each sample with its local mean, weighted by local spread.
///
/// `weight = 1 - clamp(sensitivity * stddev, 0, 1)` and the output is
/// `sample * (1 - weight) + mean * weight`: quiet windows are pulled toward
/// their mean, busy windows keep the original sample.
pub fn adaptive_filter(data: &[f64], sensitivity: f64, window_size: usize) -> Vec<f64> {
    map_windows(data, window_size / 2, BoundaryPolicy::SkipEdges, |window, sample| {
        let mean = stats::mean(window);
        let spread = stats::stddev(window, mean);
        let weight = 1.0 - (sensitivity * spread).clamp(0.0, 1.0);
        sample * (1.0 - weight) + mean * weight
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn median_filter_keeps_constant_sequence() {
        let data = vec![4.2; 20];
        for window in [0, 1, 2, 3, 4, 5, 8, 11, 40] {
            assert_eq!(median_filter(&data, window), data);
        }
    }

    #[test]
    fn median_filter_uses_truncated_upper_median_at_edges() {
        // window 3 → half-width 1; index 0 sees [5, 1] → sorted [1, 5] → 5
        let out = median_filter(&[5.0, 1.0, 9.0, 2.0], 3);
        assert_eq!(out, vec![5.0, 5.0, 2.0, 9.0]);
    }

    #[test]
    fn median_filter_rounds_even_window_up() {
        let data = [1.0, 10.0, 2.0, 3.0, 20.0, 4.0, 5.0];
        assert_eq!(median_filter(&data, 4), median_filter(&data, 5));
    }

    #[test]
    fn moving_average_uniform_is_fixed_point() {
        let data = vec![1.0; 5];
        assert_eq!(moving_average(&data, 3, false), data);
    }

    #[test]
    fn moving_average_preserves_edges() {
        let data: Vec<f64> = (0..10).map(|i| (i * i) as f64).collect();
        let out = moving_average(&data, 5, true);
        assert_eq!(out.len(), data.len());
        for i in [0, 1, 8, 9] {
            assert_eq!(out[i], data[i]);
        }
        assert_abs_diff_eq!(out[2], (0.0 + 1.0 + 4.0 + 9.0 + 16.0) / 5.0);
    }

    #[test]
    fn moving_average_averages_truncated_edges() {
        let out = moving_average(&[3.0, 6.0, 9.0], 3, false);
        assert_eq!(out, vec![4.5, 6.0, 7.5]);
    }

    #[test]
    fn moving_average_small_window_is_raised_to_three() {
        let data = [0.0, 3.0, 0.0];
        assert_eq!(moving_average(&data, 1, false), moving_average(&data, 3, false));
    }

    #[test]
    fn despike_replaces_outlier_with_median() {
        let out = despike(&[1.0, 2.0, 3.0, 100.0, 5.0, 6.0, 7.0], 3.0, 5);
        assert_eq!(out, vec![1.0, 2.0, 3.0, 5.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn despike_leaves_smooth_ramp_alone() {
        let data: Vec<f64> = (0..30).map(|i| i as f64 * 0.5).collect();
        assert_eq!(despike(&data, 3.0, 11), data);
    }

    #[test]
    fn despike_single_outlier_in_linear_region() {
        let mut data: Vec<f64> = (0..21).map(|i| 10.0 + i as f64).collect();
        data[10] = 500.0;
        let out = despike(&data, 3.0, 5);
        // window [18, 19, 500, 21, 22] → median 21
        assert_eq!(out[10], 21.0);
        for (i, (&o, &d)) in out.iter().zip(&data).enumerate() {
            if i != 10 {
                assert_eq!(o, d, "index {i} changed");
            }
        }
    }

    #[test]
    fn despike_flat_window_with_zero_mad() {
        let data = vec![2.0; 9];
        assert_eq!(despike(&data, 3.0, 5), data);
    }

    #[test]
    fn adaptive_flat_region_collapses_to_mean() {
        // Zero spread → weight 1 → output is the local mean.
        let data = vec![7.0; 12];
        assert_eq!(adaptive_filter(&data, 0.5, 5), data);
    }

    #[test]
    fn adaptive_high_variance_keeps_sample() {
        let data = [0.0, 100.0, 0.0, 100.0, 0.0, 100.0, 0.0];
        let out = adaptive_filter(&data, 1.0, 3);
        // Local stddev is ~47 so sensitivity * stddev clamps to 1 and weight is 0.
        assert_eq!(out, data.to_vec());
    }

    #[test]
    fn adaptive_low_variance_pulls_toward_mean() {
        let data = [1.0, 1.0, 1.3, 1.0, 1.0];
        let out = adaptive_filter(&data, 0.5, 3);
        let window = [1.0, 1.3, 1.0];
        let mean = stats::mean(&window);
        let spread = stats::stddev(&window, mean);
        let weight = 1.0 - 0.5 * spread;
        assert_abs_diff_eq!(out[2], 1.3 * (1.0 - weight) + mean * weight, epsilon = 1e-12);
        assert!(out[2] < 1.3);
        assert_eq!(out[0], 1.0);
        assert_eq!(out[4], 1.0);
    }
}
