//! Denoising pipeline
//!
//! Runs an ordered list of filter stages over one curve, each enabled stage
//! consuming the previous stage's output. Runs keep no state: the same input
//! and pipeline always give the same output.

use crate::error::{PipelineError, Result};
use crate::processing::filter::{FilterSettings, FilterSpec};

/// An ordered, validated list of filter stages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    specs: Vec<FilterSpec>,
}

impl Pipeline {
    /// Build a pipeline, rejecting enabled stages with invalid parameters.
    pub fn new(specs: Vec<FilterSpec>) -> Result<Self> {
        for spec in specs.iter().filter(|s| s.enabled) {
            spec.filter.validate()?;
        }
        Ok(Self { specs })
    }

    /// Build a pipeline from its stored form.
    ///
    /// Disabled entries that cannot be understood are dropped; any problem
    /// with an enabled entry fails the whole pipeline.
    pub fn from_settings(settings: &[FilterSettings]) -> Result<Self> {
        let mut specs = Vec::with_capacity(settings.len());
        for entry in settings {
            if let Some(spec) = FilterSpec::from_settings(entry)? {
                specs.push(spec);
            }
        }
        Ok(Self { specs })
    }

    pub fn specs(&self) -> &[FilterSpec] {
        &self.specs
    }

    pub fn enabled(&self) -> impl Iterator<Item = &FilterSpec> + '_ {
        self.specs.iter().filter(|s| s.enabled)
    }

    pub fn is_identity(&self) -> bool {
        self.enabled().next().is_none()
    }

    /// Run every enabled stage over `data` in order.
    ///
    /// Degenerate input is detected before the first stage runs, so a run
    /// either returns the full result or nothing.
    pub fn run(&self, data: &[f64]) -> Result<Vec<f64>> {
        if data.is_empty() {
            if let Some(spec) = self.enabled().find(|s| s.filter.requires_samples()) {
                return Err(PipelineError::DegenerateInput { filter: spec.kind() });
            }
        }

        let mut current = data.to_vec();
        for spec in self.enabled() {
            log::debug!("Applying {} to {} samples", spec.kind(), current.len());
            current = spec.filter.apply(&current)?;
        }
        Ok(current)
    }
}

/// Validate `specs` and run them over `data`.
pub fn run(data: &[f64], specs: &[FilterSpec]) -> Result<Vec<f64>> {
    Pipeline::new(specs.to_vec())?.run(data)
}
