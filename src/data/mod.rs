/// Data layer: core types, ingestion, classification, and reductions.
///
/// Architecture:
/// ```text
///       .csv upload
///           │
///           ▼
///     ┌──────────┐
///     │  loader   │  parse file → Table, infer column types
///     └──────────┘
///           │
///           ▼
///     ┌──────────┐
///     │ classify  │  name/type heuristics → location, date, gust-dir,
///     └──────────┘  numeric roles (plus lenient date coercion)
///           │
///           ▼
///     ┌──────────┐
///     │  filter   │  location filter + row window → smaller Table
///     └──────────┘
///           │
///           ▼
///     ┌──────────┐
///     │  chart    │  histogram / time series / direction frequency / xy
///     └──────────┘
/// ```
///
/// Every step takes a `&Table` and builds a new value; the uploaded table
/// is shared read-only across all pages and only replaced, wholesale, by
/// the next upload.
pub mod chart;
pub mod classify;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
