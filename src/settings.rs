//! Saved pipeline settings.
//!
//! Stored as JSON:
//! ```json
//! {
//!   "name": "Default",
//!   "algorithms": [
//!     { "name": "despike", "enabled": true,
//!       "parameters": { "threshold": 3.0, "windowSize": 11 } }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::processing::{Filter, FilterKind, FilterSettings, FilterSpec, Pipeline};

const APP_DIR: &str = "well-log-cleaner";
const SETTINGS_FILE: &str = "settings.json";

/// Stages of the shipped pipeline, in run order. Only despike is enabled.
pub const DEFAULT_ORDER: [FilterKind; 6] = [
    FilterKind::MedianFilter,
    FilterKind::MovingAverage,
    FilterKind::LowPassFilter,
    FilterKind::Despike,
    FilterKind::AdaptiveFilter,
    FilterKind::WaveletDenoising,
];

pub fn default_specs() -> Vec<FilterSpec> {
    DEFAULT_ORDER
        .into_iter()
        .map(|kind| FilterSpec {
            enabled: kind == FilterKind::Despike,
            filter: Filter::default_for(kind),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingSettings {
    pub name: String,
    pub algorithms: Vec<FilterSettings>,
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            algorithms: default_specs().iter().map(FilterSettings::from).collect(),
        }
    }
}

impl ProcessingSettings {
    pub fn from_specs(name: &str, specs: &[FilterSpec]) -> Self {
        Self {
            name: name.to_string(),
            algorithms: specs.iter().map(FilterSettings::from).collect(),
        }
    }

    /// Convert to a runnable pipeline; fails on any problem with an
    /// enabled entry.
    pub fn to_pipeline(&self) -> std::result::Result<Pipeline, PipelineError> {
        Pipeline::from_settings(&self.algorithms)
    }

    // -----------------------------------------------------------------------
    // Explicit paths
    // -----------------------------------------------------------------------

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing settings {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("serializing settings")?;
        std::fs::write(path, json).with_context(|| format!("writing settings {}", path.display()))?;
        log::info!("Saved settings '{}' to {}", self.name, path.display());
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Per-user settings file
    // -----------------------------------------------------------------------

    /// `<config dir>/well-log-cleaner/settings.json`, if the platform has a
    /// config directory.
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
    }

    /// Saved settings, or the defaults when nothing usable is saved.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring saved settings: {e:#}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::settings_path().context("no config directory on this platform")?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Delete the saved file and return the defaults.
    pub fn reset() -> Result<Self> {
        if let Some(path) = Self::settings_path().filter(|p| p.exists()) {
            std::fs::remove_file(&path)
                .with_context(|| format!("removing {}", path.display()))?;
            log::info!("Removed saved settings {}", path.display());
        }
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::ParamValue;

    #[test]
    fn defaults_enable_only_despike() {
        let settings = ProcessingSettings::default();
        let names: Vec<&str> = settings.algorithms.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "medianFilter",
                "movingAverage",
                "lowPassFilter",
                "despike",
                "adaptiveFilter",
                "waveletDenoising"
            ]
        );
        let enabled: Vec<&str> = settings
            .algorithms
            .iter()
            .filter(|a| a.enabled)
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(enabled, ["despike"]);

        let pipeline = settings.to_pipeline().unwrap();
        assert_eq!(pipeline.specs(), default_specs().as_slice());
    }

    #[test]
    fn stored_form_uses_camel_case_keys() {
        let json = serde_json::to_value(ProcessingSettings::default()).unwrap();
        let despike = &json["algorithms"][3];
        assert_eq!(despike["name"], "despike");
        assert_eq!(despike["enabled"], true);
        assert_eq!(despike["parameters"]["threshold"], 3.0);
        assert_eq!(despike["parameters"]["windowSize"], 11.0);
        assert_eq!(json["algorithms"][1]["parameters"]["preserveEdges"], true);
    }

    #[test]
    fn parses_hand_written_settings() {
        let text = r#"{
            "name": "Smooth",
            "algorithms": [
                {"name": "medianFilter", "enabled": true, "parameters": {"windowSize": 7}},
                {"name": "sharpen", "enabled": false}
            ]
        }"#;
        let settings: ProcessingSettings = serde_json::from_str(text).unwrap();
        assert_eq!(
            settings.algorithms[0].parameters["windowSize"],
            ParamValue::Number(7.0)
        );
        let pipeline = settings.to_pipeline().unwrap();
        assert_eq!(
            pipeline.specs(),
            [FilterSpec::enabled(Filter::MedianFilter { window_size: 7 })]
        );
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut specs = default_specs();
        specs[2].enabled = true;
        let settings = ProcessingSettings::from_specs("Low pass", &specs);
        settings.save_to(&path).unwrap();

        let loaded = ProcessingSettings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.to_pipeline().unwrap().specs(), specs.as_slice());
    }

    #[test]
    fn load_from_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = ProcessingSettings::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing settings"));
    }
}
