/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  housing.csv ──── or ──── remote mirror
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, category index (immutable for the session)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  price ∧ category ∧ income bracket → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  count, means, median, histogram (None when view is empty)
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
