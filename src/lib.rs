//! Well log curve cleaning: a configurable chain of denoising filters
//! applied to the curves of LAS well logs.

pub mod data;
pub mod error;
pub mod processing;
pub mod settings;
