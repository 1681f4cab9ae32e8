use thiserror::Error;

use crate::processing::filter::FilterKind;

/// A stored filter entry that cannot be turned into a runnable stage.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    #[error("{filter}: missing parameter '{parameter}'")]
    MissingParameter {
        filter: FilterKind,
        parameter: &'static str,
    },

    #[error("{filter}: parameter '{parameter}' must be {expected}")]
    WrongType {
        filter: FilterKind,
        parameter: &'static str,
        expected: &'static str,
    },

    #[error("{filter}: parameter '{parameter}' = {value} is out of range ({reason})")]
    OutOfRange {
        filter: FilterKind,
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("invalid filter configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("{filter} needs at least one sample")]
    DegenerateInput { filter: FilterKind },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
