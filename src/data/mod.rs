/// Data layer: record schema, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  normalize headers → Dataset  (or DataUnavailable)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<WorkforceRecord>, distinct states / industries
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  (state, industry) → matching records
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  sums, gender split, per-district totals
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
