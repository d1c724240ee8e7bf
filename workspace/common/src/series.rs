//! Chart-ready series shapes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One dated observation. `value` is `null` where the source table has a
/// missing observation; renderers draw a gap there.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SeriesPoint {
    /// First day of the observation month
    pub date: NaiveDate,
    /// Observed or forecast value, if any
    pub value: Option<f64>,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self { date, value }
    }
}

/// A named line for the chart legend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DashboardSeries {
    /// Legend label
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

impl DashboardSeries {
    pub fn new(name: impl Into<String>, points: Vec<SeriesPoint>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

/// Band vertices are always defined; a vertex with a missing value would
/// not be drawable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BandVertex {
    pub date: NaiveDate,
    pub value: f64,
}

/// Closed polygon shading the uncertainty around the newest forecast.
/// Vertices are listed in ring order; the first and last coincide.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BandPolygon {
    pub vertices: Vec<BandVertex>,
}
