/// Data layer: the in-memory cohort table and file loading.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → CohortFrame
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ CohortFrame  │  ordered columns, dynamically typed rows
///   └─────────────┘
///        │
///        ▼
///   feature matrix / target vector for the predictor
/// ```

pub mod loader;
pub mod model;
