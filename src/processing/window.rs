/// How a centred window behaves where it would run off either end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Use whatever in-bounds samples exist; edge samples are still rewritten.
    Truncate,
    /// Leave the first and last `half_width` samples untouched; every
    /// rewritten sample sees the full `2 * half_width + 1` window.
    SkipEdges,
}

/// Slide a window of half-width `half_width` over `data` and rewrite each
/// sample with `aggregate(window, sample)`.
///
/// The output always has the same length as `data`.
pub fn map_windows<F>(
    data: &[f64],
    half_width: usize,
    policy: BoundaryPolicy,
    mut aggregate: F,
) -> Vec<f64>
where
    F: FnMut(&[f64], f64) -> f64,
{
    let n = data.len();
    let mut out = data.to_vec();

    let range = match policy {
        BoundaryPolicy::Truncate => 0..n,
        BoundaryPolicy::SkipEdges => half_width..n.saturating_sub(half_width),
    };

    for i in range {
        let lo = i.saturating_sub(half_width);
        let hi = (i + half_width).min(n - 1);
        out[i] = aggregate(&data[lo..=hi], data[i]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_shrinks_windows_at_edges() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let lens = map_windows(&data, 2, BoundaryPolicy::Truncate, |w, _| w.len() as f64);
        assert_eq!(lens, vec![3.0, 4.0, 5.0, 4.0, 3.0]);
    }

    #[test]
    fn skip_edges_copies_boundary_samples() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let out = map_windows(&data, 1, BoundaryPolicy::SkipEdges, |_, _| 0.0);
        assert_eq!(out, vec![1.0, 0.0, 0.0, 0.0, 5.0]);
    }

    #[test]
    fn skip_edges_on_short_input_is_identity() {
        let data = [1.0, 2.0, 3.0];
        let out = map_windows(&data, 2, BoundaryPolicy::SkipEdges, |_, _| 0.0);
        assert_eq!(out, data.to_vec());
    }

    #[test]
    fn empty_input() {
        let out = map_windows(&[], 3, BoundaryPolicy::Truncate, |_, x| x);
        assert!(out.is_empty());
    }
}
