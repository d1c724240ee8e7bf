use axum::{extract::State, response::Json};
use chrono::Datelike;
use tracing::{debug, instrument, warn};

use common::RegionInfo;
use compute::source;

use crate::helpers::converters::unit_label;
use crate::schemas::{ApiResponse, AppState, CachedData};

/// List configured regions together with their data coverage
#[utoipa::path(
    get,
    path = "/api/v1/regions",
    tag = "regions",
    responses(
        (status = 200, description = "Regions retrieved successfully", body = ApiResponse<Vec<RegionInfo>>)
    )
)]
#[instrument(skip(state))]
pub async fn get_regions(State(state): State<AppState>) -> Json<ApiResponse<Vec<RegionInfo>>> {
    let cache_key = "regions".to_string();

    // Check cache first
    if let Some(CachedData::Regions(regions)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: regions,
            message: "Regions retrieved from cache".to_string(),
            success: true,
        };
        return Json(response);
    }

    let mut regions = Vec::with_capacity(state.registry.len());
    for config in state.registry.iter() {
        let table_path = state.data_dir.join(&config.table_file);
        // A region with unreadable data still lists; it just carries no year bounds.
        let years = match source::load_table(&table_path, config) {
            Ok(table) => {
                let first = table.dates().first().map(|date| date.year());
                let last = table.dates().last().map(|date| date.year());
                first.zip(last)
            }
            Err(e) => {
                warn!("Cannot read table for region {}: {}", config.region, e);
                None
            }
        };

        regions.push(RegionInfo {
            region: config.region.to_string(),
            display_name: config.display_name.clone(),
            unit: unit_label(config.unit),
            first_year: years.map(|(first, _)| first),
            last_year: years.map(|(_, last)| last),
        });
    }

    debug!("Listing {} regions", regions.len());

    // Cache the result
    state
        .cache
        .insert(cache_key, CachedData::Regions(regions.clone()))
        .await;

    let response = ApiResponse {
        data: regions,
        message: "Regions retrieved successfully".to_string(),
        success: true,
    };
    Json(response)
}
