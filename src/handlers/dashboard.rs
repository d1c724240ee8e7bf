use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use std::str::FromStr;
use tracing::{debug, instrument, trace};

use common::DashboardData;
use compute::dashboard::{MetricToggles, YearRange};
use compute::{source, UncertaintyEstimator};
use model::Region;

use crate::helpers::converters::{compute_error_response, convert_bundle};
use crate::schemas::{ApiResponse, AppState, CachedData, DashboardQuery, ErrorResponse};

/// Get the dashboard payload for one region and year range
#[utoipa::path(
    get,
    path = "/api/v1/regions/{region}/dashboard",
    tag = "dashboard",
    params(
        ("region" = String, Path, description = "Region identifier (e.g., euro-area-inflation)"),
        DashboardQuery
    ),
    responses(
        (status = 200, description = "Dashboard retrieved successfully", body = ApiResponse<DashboardData>),
        (status = 400, description = "Unknown region or invalid parameters", body = ErrorResponse),
        (status = 404, description = "Region has no dataset configured", body = ErrorResponse),
        (status = 422, description = "Source data is malformed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    Path(region): Path<String>,
    Valid(Query(query)): Valid<Query<DashboardQuery>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardData>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_dashboard function");

    let region = Region::from_str(&region).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
                code: "INVALID_REGION".to_string(),
                success: false,
            }),
        )
    })?;

    // Create cache key
    let cache_key = format!("dashboard_{}_{:?}", region, query);

    // Check cache first
    if let Some(CachedData::Dashboard(data)) = state.cache.get(&cache_key).await {
        debug!("Returning cached dashboard for {}", region);
        let response = ApiResponse {
            data,
            message: "Dashboard retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let config = state.registry.get(region).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("region {} has no dataset configured", region),
                code: "REGION_NOT_CONFIGURED".to_string(),
                success: false,
            }),
        )
    })?;

    let table = source::load_table(&state.data_dir.join(&config.table_file), config)
        .map_err(compute_error_response)?;
    let error_sample = source::load_error_sample(&state.data_dir.join(&config.errors_file))
        .map_err(compute_error_response)?;

    let bundle = compute::dashboard::assemble(
        &table,
        &error_sample,
        config,
        YearRange {
            start: query.start_year,
            end: query.end_year,
        },
        MetricToggles {
            absolute_error: query.absolute_errors,
            squared_error: query.squared_errors,
        },
        &UncertaintyEstimator::one_sigma(),
    )
    .map_err(compute_error_response)?;

    let data = convert_bundle(config, bundle);

    // Cache the result
    state
        .cache
        .insert(cache_key, CachedData::Dashboard(data.clone()))
        .await;

    let response = ApiResponse {
        data,
        message: "Dashboard retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
