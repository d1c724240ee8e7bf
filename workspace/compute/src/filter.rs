//! Inclusive year-range restriction.

use chrono::Datelike;
use tracing::trace;

use crate::table::TimeSeriesTable;

/// Rows whose date falls within `[start_year-01-01, end_year-12-31]`.
///
/// Bounds are inclusive at year granularity and row order is preserved.
/// An inverted range yields an empty table, not an error: the UI is
/// expected to keep start <= end, but a stale widget state must not
/// crash the request.
pub fn filter_years(
    table: &TimeSeriesTable,
    start_year: i32,
    end_year: i32,
) -> TimeSeriesTable {
    if start_year > end_year {
        trace!(start_year, end_year, "inverted year range yields empty table");
        return table.retained(|_| false);
    }
    table.retained(|date| date.year() >= start_year && date.year() <= end_year)
}
