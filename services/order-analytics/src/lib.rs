//! Order Aggregation & Presentation Engine
//!
//! Consumes a validated collection of order records and produces:
//! - Flattened (record, line item) rows for tabular display
//! - Filtered, sorted, paged table views
//! - Per-customer summaries grouped by phone number
//! - Item rankings, item statistics, and dashboard headline numbers
//! - Hour-of-day and per-day order volume series
//! - Period (e.g. weekly) roll-ups over a date range
//! - Export-ready row sets
//!
//! Every operation is a pure, synchronous function of its inputs. Nothing
//! mutates the record collection and nothing is cached between calls, so
//! each view can be recomputed from the full record set at any time.
//!
//! # Architecture
//!
//! ```text
//!   RawOrder batch
//!        │
//!    ┌───▼────┐
//!    │ Ingest │  ← validates once, skip-and-log or abort
//!    └───┬────┘
//!        │  OrderRecord[]
//!   ┌────┴───────┬─────────────┬─────────────┐
//!   │            │             │             │
//! ┌─▼────────┐ ┌─▼─────────┐ ┌─▼──────────┐ ┌─▼────────┐
//! │ Flatten  │ │ Aggregate │ │ TimeSeries │ │ Export   │
//! └─┬────────┘ └───────────┘ └────────────┘ └──────────┘
//!   │
//! ┌─▼────────┐
//! │ View     │  ← filter / sort / page
//! └──────────┘
//! ```

pub mod aggregate;
pub mod export;
pub mod flatten;
pub mod ingestion;
pub mod period;
pub mod range;
pub mod timeseries;
pub mod view;

pub use aggregate::{
    build_customer_summaries, build_dashboard_stats, build_item_analysis, build_item_ranking,
    Aggregator, AggregatorConfig, CustomerSummary, DashboardStats, ItemKeyPolicy, ItemRanking,
    ItemStats, MostOrderedItem,
};
pub use flatten::{flatten, FlattenedRow};
pub use ingestion::{IngestPolicy, IngestReport, IngesterConfig, IngestionError, RecordIngester};
pub use period::{build_period_summary, PeriodSummary};
pub use range::DateRange;
pub use timeseries::{build_daily_series, build_time_series, DailyCount, TimeBucket};
pub use view::{present, Page, SortDirection, SortKey, ViewConfig};

// Library version
pub const ENGINE_VERSION: &str = "0.1.0";
