use common::{
    BandPolygon, BandVertex, DashboardData, DashboardSeries, DashboardSummary, ErrorMetricSeries,
    RegionInfo, SeriesPoint, SummaryValue,
};
use model::DatasetRegistry;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};
use validator::Validate;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Dataset registry resolved at startup
    pub registry: Arc<DatasetRegistry>,
    /// Directory holding the region data files
    pub data_dir: PathBuf,
    /// Cache for expensive operations
    pub cache: Cache<String, CachedData>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Dashboard(DashboardData),
    Regions(Vec<RegionInfo>),
}

/// Query parameters for the dashboard endpoint
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct DashboardQuery {
    /// First year of the inclusive range (e.g., 2023)
    #[validate(range(min = 1900, max = 2200))]
    pub start_year: i32,
    /// Last year of the inclusive range (e.g., 2024)
    #[validate(range(min = 1900, max = 2200))]
    pub end_year: i32,
    /// Include per-month absolute errors
    #[serde(default)]
    pub absolute_errors: bool,
    /// Include per-month squared errors and their running sum
    #[serde(default)]
    pub squared_errors: bool,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Data directory status
    pub data_dir: String,
    /// Number of configured datasets
    pub datasets: usize,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::regions::get_regions,
        crate::handlers::dashboard::get_dashboard,
    ),
    components(
        schemas(
            ApiResponse<DashboardData>,
            ApiResponse<Vec<RegionInfo>>,
            ErrorResponse,
            HealthResponse,
            DashboardQuery,
            DashboardData,
            DashboardSeries,
            SeriesPoint,
            BandPolygon,
            BandVertex,
            ErrorMetricSeries,
            DashboardSummary,
            SummaryValue,
            RegionInfo,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "regions", description = "Region catalog endpoints"),
        (name = "dashboard", description = "Forecast dashboard endpoints"),
    ),
    info(
        title = "Macrodash API",
        description = "Macroeconomic forecast dashboard backend - serves actuals, forecasts, error metrics and confidence bands per region",
        version = "0.1.0",
        contact(
            name = "Macrodash Team",
            email = "contact@macrodash.dev"
        ),
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
