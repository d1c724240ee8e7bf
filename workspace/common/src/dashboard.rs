//! Full dashboard payload returned by the backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::series::{BandPolygon, DashboardSeries, SeriesPoint};

/// Error-metric series derived for one prediction column. Fields are
/// `null` when the corresponding view was not requested.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct ErrorMetricSeries {
    /// |actual - predicted| per month
    pub absolute: Option<Vec<SeriesPoint>>,
    /// (actual - predicted)^2 per month
    pub squared: Option<Vec<SeriesPoint>>,
    /// Running sum of squared error, skipping missing months
    pub cumulative_squared: Option<Vec<SeriesPoint>>,
}

/// A dated scalar for the headline numbers above the chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SummaryValue {
    pub date: NaiveDate,
    /// Already scaled to percent per the dataset's unit convention
    pub value: f64,
}

/// Headline numbers: most recent realized value and most recent forecast.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct DashboardSummary {
    pub latest_actual: Option<SummaryValue>,
    pub latest_model_forecast: Option<SummaryValue>,
}

/// Everything a rendering client needs for one region and year range.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DashboardData {
    /// Region identifier (kebab-case)
    pub region: String,
    /// Chart title
    pub display_name: String,
    /// Unit convention of the raw series ("fraction" or "percent")
    pub unit: String,
    pub actual: DashboardSeries,
    pub model_forecast: DashboardSeries,
    pub benchmark_forecast: DashboardSeries,
    /// Omitted when too few forecast points exist to build one
    pub band: Option<BandPolygon>,
    pub model_errors: ErrorMetricSeries,
    pub benchmark_errors: ErrorMetricSeries,
    pub summary: DashboardSummary,
}

/// Catalog entry for the region picker.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RegionInfo {
    /// Region identifier (kebab-case)
    pub region: String,
    pub display_name: String,
    /// "fraction" or "percent"
    pub unit: String,
    /// First year with data, when the table is readable
    pub first_year: Option<i32>,
    /// Last year with data, when the table is readable
    pub last_year: Option<i32>,
}
