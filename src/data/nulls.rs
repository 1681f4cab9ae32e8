//! Missing-sample handling around a pipeline run.
//!
//! The filters treat every sample as a number, so gaps are bridged by
//! linear interpolation before the run and the null marker is put back
//! afterwards.

use crate::error::Result;
use crate::processing::Pipeline;

pub fn is_null(value: f64, null_value: f64) -> bool {
    !value.is_finite() || value == null_value
}

/// Replace the samples at `gaps` by linear interpolation between their
/// nearest valid neighbours; leading and trailing gaps take the nearest
/// valid value. Returns `None` when there is no valid sample at all.
pub fn fill_gaps(values: &[f64], gaps: &[bool]) -> Option<Vec<f64>> {
    let valid: Vec<usize> = (0..values.len()).filter(|&i| !gaps[i]).collect();
    let (&first, &last) = (valid.first()?, valid.last()?);

    let mut filled = values.to_vec();
    filled[..first].fill(values[first]);
    filled[last + 1..].fill(values[last]);
    for pair in valid.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if b - a < 2 {
            continue;
        }
        let (va, vb) = (values[a], values[b]);
        for i in a + 1..b {
            let t = (i - a) as f64 / (b - a) as f64;
            filled[i] = va + (vb - va) * t;
        }
    }
    Some(filled)
}

/// Run `pipeline` over a curve that may contain null samples.
///
/// Null positions come back as `null_value`. A curve with no valid sample
/// is returned unchanged.
pub fn run_with_nulls(values: &[f64], null_value: f64, pipeline: &Pipeline) -> Result<Vec<f64>> {
    if values.is_empty() {
        return pipeline.run(values);
    }

    let gaps: Vec<bool> = values.iter().map(|&v| is_null(v, null_value)).collect();
    let Some(filled) = fill_gaps(values, &gaps) else {
        log::warn!("Curve has no valid samples, leaving it untouched");
        return Ok(values.to_vec());
    };

    let mut out = pipeline.run(&filled)?;
    for (sample, &gap) in out.iter_mut().zip(&gaps) {
        if gap {
            *sample = null_value;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{Filter, FilterSpec};

    const NULL: f64 = -999.25;

    fn gaps_of(values: &[f64]) -> Vec<bool> {
        values.iter().map(|&v| is_null(v, NULL)).collect()
    }

    #[test]
    fn detects_marker_and_non_finite() {
        assert!(is_null(NULL, NULL));
        assert!(is_null(f64::NAN, NULL));
        assert!(is_null(f64::INFINITY, NULL));
        assert!(!is_null(0.0, NULL));
    }

    #[test]
    fn interpolates_interior_gap() {
        let values = [1.0, NULL, NULL, 4.0];
        let filled = fill_gaps(&values, &gaps_of(&values)).unwrap();
        assert_eq!(filled, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn extends_edge_gaps() {
        let values = [f64::NAN, 2.0, 5.0, NULL];
        let filled = fill_gaps(&values, &gaps_of(&values)).unwrap();
        assert_eq!(filled, vec![2.0, 2.0, 5.0, 5.0]);
    }

    #[test]
    fn all_null_has_nothing_to_fill() {
        let values = [NULL, NULL];
        assert_eq!(fill_gaps(&values, &gaps_of(&values)), None);
    }

    #[test]
    fn nulls_survive_a_run() {
        let pipeline = Pipeline::new(vec![FilterSpec::enabled(Filter::MovingAverage {
            window_size: 3,
            preserve_edges: false,
        })])
        .unwrap();
        let values = [1.0, 1.0, NULL, 1.0, 1.0];
        let out = run_with_nulls(&values, NULL, &pipeline).unwrap();
        assert_eq!(out, vec![1.0, 1.0, NULL, 1.0, 1.0]);
    }

    #[test]
    fn all_null_curve_is_untouched() {
        let pipeline = Pipeline::new(vec![FilterSpec::enabled(Filter::MedianFilter {
            window_size: 3,
        })])
        .unwrap();
        let values = [NULL; 4];
        assert_eq!(run_with_nulls(&values, NULL, &pipeline).unwrap(), values.to_vec());
    }
}
