//! Data-preparation core for the macro-forecast dashboard.
//!
//! The flow for one request: load a region's table and error sample
//! (`source`), re-key each forecast column onto the period it predicts
//! and re-join (`table`), restrict to the selected years (`filter`),
//! derive error metrics (`metrics`) and the confidence band
//! (`uncertainty` + `band`), and summarize. `dashboard::assemble` runs
//! the whole flow; the individual modules stay usable on their own.

pub mod band;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod source;
pub mod table;
#[cfg(test)]
pub mod testing;
pub mod uncertainty;

pub use band::{ConfidenceBand, build_band};
pub use dashboard::{DashboardBundle, MetricToggles, YearRange, assemble};
pub use error::{ComputeError, Result};
pub use filter::filter_years;
pub use table::TimeSeriesTable;
pub use uncertainty::{UncertaintyEstimator, UncertaintyFit};
