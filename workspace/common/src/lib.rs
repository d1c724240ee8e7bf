//! Common transport-layer types shared between backend and rendering clients.
//! These structs mirror the backend handlers' response payloads so a chart
//! frontend can deserialize API responses without duplicating shapes.

mod dashboard;
mod series;

pub use dashboard::{
    DashboardData, DashboardSummary, ErrorMetricSeries, RegionInfo, SummaryValue,
};
pub use series::{BandPolygon, BandVertex, DashboardSeries, SeriesPoint};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
/// Note: The backend has its own definition in src/schemas.rs with the
/// same field names. We mirror it here for clients to reuse.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}
