use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{spectral, wavelet, windowed};
use crate::error::{ConfigError, Result};

// ---------------------------------------------------------------------------
// FilterKind – the closed set of stages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    MedianFilter,
    MovingAverage,
    LowPassFilter,
    Despike,
    WaveletDenoising,
    AdaptiveFilter,
}

impl FilterKind {
    pub const ALL: [FilterKind; 6] = [
        FilterKind::MedianFilter,
        FilterKind::MovingAverage,
        FilterKind::LowPassFilter,
        FilterKind::Despike,
        FilterKind::WaveletDenoising,
        FilterKind::AdaptiveFilter,
    ];

    /// Name used in stored settings.
    pub fn key(self) -> &'static str {
        match self {
            FilterKind::MedianFilter => "medianFilter",
            FilterKind::MovingAverage => "movingAverage",
            FilterKind::LowPassFilter => "lowPassFilter",
            FilterKind::Despike => "despike",
            FilterKind::WaveletDenoising => "waveletDenoising",
            FilterKind::AdaptiveFilter => "adaptiveFilter",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// Human-readable name for the UI.
    pub fn label(self) -> &'static str {
        match self {
            FilterKind::MedianFilter => "Median Filter",
            FilterKind::MovingAverage => "Moving Average",
            FilterKind::LowPassFilter => "Low-Pass Filter (FFT)",
            FilterKind::Despike => "Despike",
            FilterKind::WaveletDenoising => "Wavelet Denoising",
            FilterKind::AdaptiveFilter => "Adaptive Filter",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Filter – a stage with its typed parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    MedianFilter { window_size: usize },
    MovingAverage { window_size: usize, preserve_edges: bool },
    LowPassFilter { cutoff_frequency: f64 },
    Despike { threshold: f64, window_size: usize },
    WaveletDenoising { threshold: f64, level: u32 },
    AdaptiveFilter { sensitivity: f64, window_size: usize },
}

impl Filter {
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::MedianFilter { .. } => FilterKind::MedianFilter,
            Filter::MovingAverage { .. } => FilterKind::MovingAverage,
            Filter::LowPassFilter { .. } => FilterKind::LowPassFilter,
            Filter::Despike { .. } => FilterKind::Despike,
            Filter::WaveletDenoising { .. } => FilterKind::WaveletDenoising,
            Filter::AdaptiveFilter { .. } => FilterKind::AdaptiveFilter,
        }
    }

    /// Default parameters, matching the shipped settings.
    pub fn default_for(kind: FilterKind) -> Self {
        match kind {
            FilterKind::MedianFilter => Filter::MedianFilter { window_size: 5 },
            FilterKind::MovingAverage => Filter::MovingAverage {
                window_size: 5,
                preserve_edges: true,
            },
            FilterKind::LowPassFilter => Filter::LowPassFilter {
                cutoff_frequency: 0.1,
            },
            FilterKind::Despike => Filter::Despike {
                threshold: 3.0,
                window_size: 11,
            },
            FilterKind::WaveletDenoising => Filter::WaveletDenoising {
                threshold: 0.1,
                level: 3,
            },
            FilterKind::AdaptiveFilter => Filter::AdaptiveFilter {
                sensitivity: 0.5,
                window_size: 11,
            },
        }
    }

    /// Whether the stage cannot run on an empty sequence.
    pub fn requires_samples(&self) -> bool {
        matches!(self, Filter::LowPassFilter { .. })
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let kind = self.kind();
        let out_of_range = |parameter, value, reason| ConfigError::OutOfRange {
            filter: kind,
            parameter,
            value,
            reason,
        };
        match *self {
            Filter::MedianFilter { .. } | Filter::MovingAverage { .. } => Ok(()),
            Filter::LowPassFilter { cutoff_frequency } => {
                if cutoff_frequency.is_finite() && cutoff_frequency > 0.0 && cutoff_frequency <= 0.5 {
                    Ok(())
                } else {
                    Err(out_of_range(CUTOFF_FREQUENCY, cutoff_frequency, "expected 0 < f <= 0.5"))
                }
            }
            Filter::Despike { threshold, .. } => {
                if threshold.is_finite() {
                    Ok(())
                } else {
                    Err(out_of_range(THRESHOLD, threshold, "expected a finite number"))
                }
            }
            Filter::WaveletDenoising { threshold, level } => {
                if !(0.0..=1.0).contains(&threshold) {
                    return Err(out_of_range(THRESHOLD, threshold, "expected 0 <= t <= 1"));
                }
                if level < 1 {
                    return Err(out_of_range(LEVEL, level as f64, "expected level >= 1"));
                }
                Ok(())
            }
            Filter::AdaptiveFilter { sensitivity, .. } => {
                if sensitivity.is_finite() {
                    Ok(())
                } else {
                    Err(out_of_range(SENSITIVITY, sensitivity, "expected a finite number"))
                }
            }
        }
    }

    /// Run this stage over `data`, returning a fresh sequence of equal length.
    pub fn apply(&self, data: &[f64]) -> Result<Vec<f64>> {
        let out = match *self {
            Filter::MedianFilter { window_size } => windowed::median_filter(data, window_size),
            Filter::MovingAverage {
                window_size,
                preserve_edges,
            } => windowed::moving_average(data, window_size, preserve_edges),
            Filter::LowPassFilter { cutoff_frequency } => {
                spectral::low_pass_filter(data, cutoff_frequency)?
            }
            Filter::Despike {
                threshold,
                window_size,
            } => windowed::despike(data, threshold, window_size),
            Filter::WaveletDenoising { threshold, level } => {
                wavelet::wavelet_denoising(data, threshold, level)
            }
            Filter::AdaptiveFilter {
                sensitivity,
                window_size,
            } => windowed::adaptive_filter(data, sensitivity, window_size),
        };
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// FilterSpec – one pipeline entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub enabled: bool,
    pub filter: Filter,
}

impl FilterSpec {
    pub fn enabled(filter: Filter) -> Self {
        Self {
            enabled: true,
            filter,
        }
    }

    pub fn disabled(filter: Filter) -> Self {
        Self {
            enabled: false,
            filter,
        }
    }

    pub fn kind(&self) -> FilterKind {
        self.filter.kind()
    }

    /// Build a typed entry from its stored form.
    ///
    /// Returns `Ok(None)` for a disabled entry that cannot be understood
    /// (unknown name or bad parameters); such an entry would never run.
    pub fn from_settings(settings: &FilterSettings) -> std::result::Result<Option<Self>, ConfigError> {
        let parsed = FilterKind::from_key(&settings.name)
            .ok_or_else(|| ConfigError::UnknownFilter(settings.name.clone()))
            .and_then(|kind| parse_parameters(kind, &settings.parameters));

        match parsed {
            Ok(filter) => Ok(Some(FilterSpec {
                enabled: settings.enabled,
                filter,
            })),
            Err(e) if !settings.enabled => {
                log::warn!("Ignoring disabled filter entry '{}': {e}", settings.name);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Stored form: name + enabled + loosely typed parameter map
// ---------------------------------------------------------------------------

pub const WINDOW_SIZE: &str = "windowSize";
pub const PRESERVE_EDGES: &str = "preserveEdges";
pub const CUTOFF_FREQUENCY: &str = "cutoffFrequency";
pub const THRESHOLD: &str = "threshold";
pub const SENSITIVITY: &str = "sensitivity";
pub const LEVEL: &str = "level";

/// A parameter value as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// One pipeline entry as persisted in settings files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    pub name: String,
    pub enabled: bool,
    #[serde(default)]
    pub parameters: BTreeMap<String, ParamValue>,
}

impl From<&FilterSpec> for FilterSettings {
    fn from(spec: &FilterSpec) -> Self {
        use ParamValue::{Bool, Number};

        let entries: Vec<(&str, ParamValue)> = match spec.filter {
            Filter::MedianFilter { window_size } => vec![(WINDOW_SIZE, Number(window_size as f64))],
            Filter::MovingAverage {
                window_size,
                preserve_edges,
            } => vec![
                (WINDOW_SIZE, Number(window_size as f64)),
                (PRESERVE_EDGES, Bool(preserve_edges)),
            ],
            Filter::LowPassFilter { cutoff_frequency } => {
                vec![(CUTOFF_FREQUENCY, Number(cutoff_frequency))]
            }
            Filter::Despike {
                threshold,
                window_size,
            } => vec![
                (THRESHOLD, Number(threshold)),
                (WINDOW_SIZE, Number(window_size as f64)),
            ],
            Filter::WaveletDenoising { threshold, level } => vec![
                (THRESHOLD, Number(threshold)),
                (LEVEL, Number(level as f64)),
            ],
            Filter::AdaptiveFilter {
                sensitivity,
                window_size,
            } => vec![
                (SENSITIVITY, Number(sensitivity)),
                (WINDOW_SIZE, Number(window_size as f64)),
            ],
        };

        FilterSettings {
            name: spec.kind().key().to_string(),
            enabled: spec.enabled,
            parameters: entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        }
    }
}

struct Params<'a> {
    kind: FilterKind,
    map: &'a BTreeMap<String, ParamValue>,
}

impl Params<'_> {
    fn get(&self, key: &'static str) -> std::result::Result<&ParamValue, ConfigError> {
        self.map.get(key).ok_or(ConfigError::MissingParameter {
            filter: self.kind,
            parameter: key,
        })
    }

    fn number(&self, key: &'static str) -> std::result::Result<f64, ConfigError> {
        match self.get(key)? {
            ParamValue::Number(v) => Ok(*v),
            _ => Err(ConfigError::WrongType {
                filter: self.kind,
                parameter: key,
                expected: "a number",
            }),
        }
    }

    fn flag(&self, key: &'static str) -> std::result::Result<bool, ConfigError> {
        match self.get(key)? {
            ParamValue::Bool(b) => Ok(*b),
            _ => Err(ConfigError::WrongType {
                filter: self.kind,
                parameter: key,
                expected: "true or false",
            }),
        }
    }

    fn whole(&self, key: &'static str) -> std::result::Result<usize, ConfigError> {
        let v = self.number(key)?;
        if v.is_finite() && v >= 0.0 && v.fract() == 0.0 {
            Ok(v as usize)
        } else {
            Err(ConfigError::OutOfRange {
                filter: self.kind,
                parameter: key,
                value: v,
                reason: "expected a non-negative whole number",
            })
        }
    }
}

fn parse_parameters(
    kind: FilterKind,
    map: &BTreeMap<String, ParamValue>,
) -> std::result::Result<Filter, ConfigError> {
    let p = Params { kind, map };
    let filter = match kind {
        FilterKind::MedianFilter => Filter::MedianFilter {
            window_size: p.whole(WINDOW_SIZE)?,
        },
        FilterKind::MovingAverage => Filter::MovingAverage {
            window_size: p.whole(WINDOW_SIZE)?,
            preserve_edges: p.flag(PRESERVE_EDGES)?,
        },
        FilterKind::LowPassFilter => Filter::LowPassFilter {
            cutoff_frequency: p.number(CUTOFF_FREQUENCY)?,
        },
        FilterKind::Despike => Filter::Despike {
            threshold: p.number(THRESHOLD)?,
            window_size: p.whole(WINDOW_SIZE)?,
        },
        FilterKind::WaveletDenoising => Filter::WaveletDenoising {
            threshold: p.number(THRESHOLD)?,
            level: u32::try_from(p.whole(LEVEL)?).unwrap_or(u32::MAX),
        },
        FilterKind::AdaptiveFilter => Filter::AdaptiveFilter {
            sensitivity: p.number(SENSITIVITY)?,
            window_size: p.whole(WINDOW_SIZE)?,
        },
    };
    filter.validate()?;
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(name: &str, enabled: bool, json: &str) -> FilterSettings {
        FilterSettings {
            name: name.to_string(),
            enabled,
            parameters: serde_json::from_str(json).unwrap(),
        }
    }

    #[test]
    fn kind_keys_round_trip() {
        for kind in FilterKind::ALL {
            assert_eq!(FilterKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(FilterKind::from_key("savitzkyGolay"), None);
    }

    #[test]
    fn parses_stored_despike() {
        let s = settings("despike", true, r#"{"threshold": 3.0, "windowSize": 11}"#);
        let spec = FilterSpec::from_settings(&s).unwrap().unwrap();
        assert_eq!(
            spec,
            FilterSpec::enabled(Filter::Despike {
                threshold: 3.0,
                window_size: 11
            })
        );
    }

    #[test]
    fn missing_parameter_on_enabled_filter() {
        let s = settings("movingAverage", true, r#"{"windowSize": 5}"#);
        assert_eq!(
            FilterSpec::from_settings(&s),
            Err(ConfigError::MissingParameter {
                filter: FilterKind::MovingAverage,
                parameter: PRESERVE_EDGES
            })
        );
    }

    #[test]
    fn wrong_type_on_enabled_filter() {
        let s = settings("lowPassFilter", true, r#"{"cutoffFrequency": "high"}"#);
        assert!(matches!(
            FilterSpec::from_settings(&s),
            Err(ConfigError::WrongType { parameter: CUTOFF_FREQUENCY, .. })
        ));
    }

    #[test]
    fn out_of_range_cutoff() {
        let s = settings("lowPassFilter", true, r#"{"cutoffFrequency": 0.75}"#);
        assert!(matches!(
            FilterSpec::from_settings(&s),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn fractional_window_is_rejected() {
        let s = settings("medianFilter", true, r#"{"windowSize": 4.5}"#);
        assert!(matches!(
            FilterSpec::from_settings(&s),
            Err(ConfigError::OutOfRange { parameter: WINDOW_SIZE, .. })
        ));
    }

    #[test]
    fn unknown_filter_enabled_is_an_error() {
        let s = settings("savitzkyGolay", true, "{}");
        assert_eq!(
            FilterSpec::from_settings(&s),
            Err(ConfigError::UnknownFilter("savitzkyGolay".into()))
        );
    }

    #[test]
    fn unknown_or_broken_filter_disabled_is_dropped() {
        let s = settings("savitzkyGolay", false, "{}");
        assert_eq!(FilterSpec::from_settings(&s), Ok(None));
        let s = settings("despike", false, "{}");
        assert_eq!(FilterSpec::from_settings(&s), Ok(None));
    }

    #[test]
    fn stored_form_round_trips() {
        for kind in FilterKind::ALL {
            let spec = FilterSpec::enabled(Filter::default_for(kind));
            let stored = FilterSettings::from(&spec);
            assert_eq!(stored.name, kind.key());
            assert_eq!(FilterSpec::from_settings(&stored), Ok(Some(spec)));
        }
    }

    #[test]
    fn wavelet_level_bounds() {
        let zero = Filter::WaveletDenoising {
            threshold: 0.1,
            level: 0,
        };
        assert!(zero.validate().is_err());
        for level in [17, 64, u32::MAX] {
            let deep = Filter::WaveletDenoising {
                threshold: 0.1,
                level,
            };
            assert_eq!(deep.validate(), Ok(()), "level {level}");
        }
        let deep = Filter::WaveletDenoising {
            threshold: 0.1,
            level: 64,
        };
        assert_eq!(deep.apply(&[1.0, 2.0, 3.0]).unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn negative_threshold_and_sensitivity_are_accepted() {
        let data = [1.0, 2.0, 3.0, 100.0, 5.0, 6.0, 7.0];

        // Every interior sample exceeds a negative MAD multiple.
        let despike = Filter::Despike {
            threshold: -1.0,
            window_size: 3,
        };
        assert_eq!(despike.validate(), Ok(()));
        assert_eq!(
            despike.apply(&data).unwrap(),
            vec![1.0, 2.0, 3.0, 5.0, 6.0, 6.0, 7.0]
        );

        // A negative sensitivity clamps the weight to 1: interior samples
        // become their window mean.
        let adaptive = Filter::AdaptiveFilter {
            sensitivity: -0.5,
            window_size: 3,
        };
        assert_eq!(adaptive.validate(), Ok(()));
        let out = adaptive.apply(&[0.0, 3.0, 6.0, 0.0]).unwrap();
        assert_eq!(out, vec![0.0, 3.0, 3.0, 0.0]);

        let nan = Filter::AdaptiveFilter {
            sensitivity: f64::NAN,
            window_size: 3,
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn apply_preserves_length() {
        let data: Vec<f64> = (0..50).map(|i| (i as f64 * 0.37).sin() * 10.0).collect();
        for kind in FilterKind::ALL {
            let out = Filter::default_for(kind).apply(&data).unwrap();
            assert_eq!(out.len(), data.len(), "{kind}");
        }
    }
}
