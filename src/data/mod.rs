/// Data layer: well logs, loading, export and before/after summaries.
///
/// Architecture:
/// ```text
///  .las / .csv / .txt
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → WellLog
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  WellLog  │  headers, depth column, one column per curve
///   └──────────┘
///        │  process(pipeline, selection)
///        ▼
///   ┌──────────┐
///   │  nulls    │  bridge NULL gaps, run the pipeline, restore NULLs
///   └──────────┘
///        │
///        ├──► summary   before/after statistics per curve
///        └──► export    LAS / CSV writers
/// ```

pub mod export;
pub mod loader;
pub mod model;
pub mod nulls;
pub mod selection;
pub mod summary;
