/// Curve denoising: statistics, filters and the pipeline that chains them.
///
/// Architecture:
/// ```text
///   &[f64] curve + Vec<FilterSpec>
///        │
///        ▼
///   ┌──────────┐
///   │ pipeline  │  enabled stages in order, output of one feeds the next
///   └──────────┘
///        │  Filter::apply (match on the stage)
///        ▼
///   ┌───────────┬────────────┬──────────┐
///   │ windowed  │  spectral  │ wavelet  │
///   └───────────┴────────────┴──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  window   │  shared sliding-window iteration
///   │  stats    │  median / MAD / mean / stddev
///   └──────────┘
/// ```

pub mod filter;
pub mod pipeline;
pub mod spectral;
pub mod stats;
pub mod wavelet;
pub mod window;
pub mod windowed;

pub use filter::{Filter, FilterKind, FilterSettings, FilterSpec, ParamValue};
pub use pipeline::{run, Pipeline};
