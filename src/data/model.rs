use anyhow::{bail, Result};

use super::nulls;
use super::selection::CurveSelection;
use crate::error::PipelineError;
use crate::processing::Pipeline;

// ---------------------------------------------------------------------------
// Header items – one `MNEM.UNIT VALUE : DESCRIPTION` line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderItem {
    pub mnemonic: String,
    pub unit: String,
    pub value: String,
    pub description: String,
}

impl HeaderItem {
    pub fn new(mnemonic: &str, unit: &str, value: &str, description: &str) -> Self {
        Self {
            mnemonic: mnemonic.to_string(),
            unit: unit.to_string(),
            value: value.to_string(),
            description: description.to_string(),
        }
    }

    /// The value as a number, if it parses as one.
    pub fn as_f64(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok()
    }
}

// ---------------------------------------------------------------------------
// CurveInfo – one `~C` entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurveInfo {
    pub name: String,
    pub unit: String,
    pub description: String,
}

impl CurveInfo {
    pub fn new(name: &str, unit: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            unit: unit.to_string(),
            description: description.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// WellLog – the complete loaded file
// ---------------------------------------------------------------------------

/// A loaded well log in column form: one depth column plus one value
/// column per curve, all of the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct WellLog {
    pub file_name: String,
    /// LAS version string (`VERS`).
    pub version: String,
    /// `~W` section items in file order.
    pub well_info: Vec<HeaderItem>,
    /// The index curve (first `~C` entry, usually depth).
    pub depth_curve: CurveInfo,
    /// Data curves, excluding the index curve.
    pub curves: Vec<CurveInfo>,
    pub depth: Vec<f64>,
    /// `values[c][row]` for curve `c`.
    pub values: Vec<Vec<f64>>,
}

impl WellLog {
    /// Null marker used when the header does not define `NULL`.
    pub const DEFAULT_NULL: f64 = -999.25;

    /// Assemble a log from columns, checking that every column matches the
    /// depth column in length.
    pub fn from_columns(
        file_name: &str,
        depth_curve: CurveInfo,
        curves: Vec<CurveInfo>,
        depth: Vec<f64>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self> {
        if curves.len() != values.len() {
            bail!(
                "{} curve definitions but {} value columns",
                curves.len(),
                values.len()
            );
        }
        for (curve, column) in curves.iter().zip(&values) {
            if column.len() != depth.len() {
                bail!(
                    "Curve {} has {} samples but depth has {}",
                    curve.name,
                    column.len(),
                    depth.len()
                );
            }
        }
        Ok(Self {
            file_name: file_name.to_string(),
            version: "2.0".to_string(),
            well_info: Vec::new(),
            depth_curve,
            curves,
            depth,
            values,
        })
    }

    /// Look up a `~W` item by mnemonic (case-insensitive).
    pub fn header(&self, mnemonic: &str) -> Option<&HeaderItem> {
        self.well_info
            .iter()
            .find(|item| item.mnemonic.eq_ignore_ascii_case(mnemonic))
    }

    pub fn header_number(&self, mnemonic: &str) -> Option<f64> {
        self.header(mnemonic).and_then(HeaderItem::as_f64)
    }

    pub fn null_value(&self) -> f64 {
        self.header_number("NULL").unwrap_or(Self::DEFAULT_NULL)
    }

    pub fn well_name(&self) -> &str {
        self.header("WELL")
            .map(|item| item.value.as_str())
            .filter(|v| !v.is_empty())
            .unwrap_or("UNKNOWN")
    }

    /// Number of depth steps.
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    pub fn curve_index(&self, name: &str) -> Option<usize> {
        self.curves.iter().position(|c| c.name == name)
    }

    pub fn curve(&self, name: &str) -> Option<&[f64]> {
        self.curve_index(name).map(|i| self.values[i].as_slice())
    }

    /// First and last depth values, in file order.
    pub fn depth_range(&self) -> Option<(f64, f64)> {
        Some((*self.depth.first()?, *self.depth.last()?))
    }

    /// Run `pipeline` over each curve independently and return the cleaned
    /// log. With a `selection`, only the named curves are processed; the
    /// others are copied as-is. Depth and headers are never touched.
    pub fn process(
        &self,
        pipeline: &Pipeline,
        selection: Option<&CurveSelection>,
    ) -> std::result::Result<WellLog, PipelineError> {
        let null_value = self.null_value();
        let mut processed = self.clone();

        for (curve, column) in self.curves.iter().zip(processed.values.iter_mut()) {
            if selection.is_some_and(|s| !s.contains(&curve.name)) {
                continue;
            }
            log::debug!("Processing curve {} ({} samples)", curve.name, column.len());
            *column = nulls::run_with_nulls(column, null_value, pipeline)?;
        }
        Ok(processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{Filter, FilterSpec};

    fn sample_log() -> WellLog {
        let mut log = WellLog::from_columns(
            "test.las",
            CurveInfo::new("DEPT", "M", "DEPTH"),
            vec![CurveInfo::new("GR", "GAPI", "GAMMA RAY"), CurveInfo::new("RT", "OHMM", "RESISTIVITY")],
            vec![100.0, 100.5, 101.0, 101.5, 102.0, 102.5, 103.0],
            vec![
                vec![1.0, 2.0, 3.0, 100.0, 5.0, 6.0, 7.0],
                vec![10.0, 10.0, 10.0, 90.0, 10.0, 10.0, 10.0],
            ],
        )
        .unwrap();
        log.well_info.push(HeaderItem::new("NULL", "", "-999.25", "NULL VALUE"));
        log.well_info.push(HeaderItem::new("WELL", "", "WELL-01", "WELL"));
        log
    }

    fn despike() -> Pipeline {
        Pipeline::new(vec![FilterSpec::enabled(Filter::Despike {
            threshold: 3.0,
            window_size: 5,
        })])
        .unwrap()
    }

    #[test]
    fn mismatched_columns_are_rejected() {
        let result = WellLog::from_columns(
            "bad",
            CurveInfo::new("DEPT", "M", ""),
            vec![CurveInfo::new("GR", "", "")],
            vec![1.0, 2.0],
            vec![vec![1.0]],
        );
        assert!(result.is_err());
    }

    #[test]
    fn header_lookup() {
        let log = sample_log();
        assert_eq!(log.null_value(), -999.25);
        assert_eq!(log.well_name(), "WELL-01");
        assert!(log.header("null").is_some());
        assert_eq!(log.depth_range(), Some((100.0, 103.0)));
    }

    #[test]
    fn process_cleans_every_curve() {
        let log = sample_log();
        let out = log.process(&despike(), None).unwrap();
        assert_eq!(out.curve("GR").unwrap()[3], 5.0);
        assert_eq!(out.curve("RT").unwrap()[3], 10.0);
        assert_eq!(out.depth, log.depth);
        assert_eq!(out.well_info, log.well_info);
    }

    #[test]
    fn process_respects_selection() {
        let log = sample_log();
        let selection: CurveSelection = ["RT".to_string()].into_iter().collect();
        let out = log.process(&despike(), Some(&selection)).unwrap();
        assert_eq!(out.curve("GR").unwrap(), log.curve("GR").unwrap());
        assert_eq!(out.curve("RT").unwrap()[3], 10.0);
    }
}
