use super::model::WellLog;
use super::nulls::is_null;
use crate::processing::stats;

// ---------------------------------------------------------------------------
// Per-curve statistics over the valid (non-null) samples
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveStats {
    pub valid: usize,
    pub nulls: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl CurveStats {
    /// Statistics of the samples that are neither non-finite nor
    /// `null_value`. With no valid sample every statistic is NaN.
    pub fn compute(values: &[f64], null_value: f64) -> Self {
        let valid: Vec<f64> = values
            .iter()
            .copied()
            .filter(|&v| !is_null(v, null_value))
            .collect();

        if valid.is_empty() {
            return Self {
                valid: 0,
                nulls: values.len(),
                min: f64::NAN,
                max: f64::NAN,
                mean: f64::NAN,
                std_dev: f64::NAN,
            };
        }

        let mean = stats::mean(&valid);
        Self {
            valid: valid.len(),
            nulls: values.len() - valid.len(),
            min: valid.iter().copied().fold(f64::INFINITY, f64::min),
            max: valid.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean,
            std_dev: stats::stddev(&valid, mean),
        }
    }
}

// ---------------------------------------------------------------------------
// Before / after comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CurveSummary {
    pub name: String,
    pub unit: String,
    pub before: CurveStats,
    pub after: CurveStats,
}

impl CurveSummary {
    /// `(1 - after_std / before_std) * 100`, in percent.
    /// `None` when the original curve has no spread to reduce.
    pub fn noise_reduction(&self) -> Option<f64> {
        let before = self.before.std_dev;
        if !before.is_finite() || before == 0.0 || !self.after.std_dev.is_finite() {
            return None;
        }
        Some((1.0 - self.after.std_dev / before) * 100.0)
    }
}

/// Compare every curve of `original` with the curve of the same name in
/// `processed`. Curves missing from `processed` are skipped.
pub fn summarize(original: &WellLog, processed: &WellLog) -> Vec<CurveSummary> {
    let null_before = original.null_value();
    let null_after = processed.null_value();

    original
        .curves
        .iter()
        .zip(&original.values)
        .filter_map(|(curve, before)| {
            let after = processed.curve(&curve.name)?;
            Some(CurveSummary {
                name: curve.name.clone(),
                unit: curve.unit.clone(),
                before: CurveStats::compute(before, null_before),
                after: CurveStats::compute(after, null_after),
            })
        })
        .collect()
}
