/// Data layer: sales table, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SalesTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  product line → FilteredView (row indices)
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌─────────┐   ┌──────────┐
///   │  stats   │   │  series   │  SummaryStats / DailyQuantitySeries
///   └─────────┘   └──────────┘
///        │              │
///        └──────┬───────┘
///               ▼
///        ┌─────────────┐
///        │  dashboard   │  bundle + per-selection cache
///        └─────────────┘
/// ```

pub mod dashboard;
pub mod filter;
pub mod loader;
pub mod model;
pub mod series;
pub mod stats;
