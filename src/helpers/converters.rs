use axum::http::StatusCode;
use axum::response::Json;

use common::{
    BandPolygon, BandVertex, DashboardData, DashboardSeries, DashboardSummary, ErrorMetricSeries,
    SeriesPoint, SummaryValue,
};
use compute::dashboard::{DashboardBundle, LatestValue, MetricSeries, Series};
use compute::ComputeError;
use model::{DatasetConfig, ValueUnit};

use crate::schemas::ErrorResponse;

/// Helper function to convert a compute bundle into the transport payload
pub fn convert_bundle(config: &DatasetConfig, bundle: DashboardBundle) -> DashboardData {
    DashboardData {
        region: config.region.to_string(),
        display_name: config.display_name.clone(),
        unit: unit_label(config.unit),
        actual: convert_series("actual", bundle.actual),
        model_forecast: convert_series("model_forecast", bundle.model_forecast),
        benchmark_forecast: convert_series("benchmark_forecast", bundle.benchmark_forecast),
        band: bundle.band.map(|band| BandPolygon {
            vertices: band
                .vertices
                .iter()
                .map(|(date, value)| BandVertex {
                    date: *date,
                    value: *value,
                })
                .collect(),
        }),
        model_errors: convert_metrics(bundle.model_metrics),
        benchmark_errors: convert_metrics(bundle.benchmark_metrics),
        summary: DashboardSummary {
            latest_actual: bundle.summary.latest_actual.map(convert_latest),
            latest_model_forecast: bundle.summary.latest_model_forecast.map(convert_latest),
        },
    }
}

/// Wire label for a value unit
pub fn unit_label(unit: ValueUnit) -> String {
    match unit {
        ValueUnit::Fraction => "fraction".to_string(),
        ValueUnit::Percent => "percent".to_string(),
    }
}

/// Maps compute errors onto HTTP responses with stable error codes
pub fn compute_error_response(error: ComputeError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &error {
        ComputeError::MalformedInput(_) => (StatusCode::UNPROCESSABLE_ENTITY, "MALFORMED_INPUT"),
        ComputeError::Configuration(_) => (StatusCode::BAD_REQUEST, "INVALID_CONFIGURATION"),
        // Assembly downgrades short data to omitted components, so this
        // only escapes when there is nothing at all to serve.
        ComputeError::InsufficientData(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "INSUFFICIENT_DATA")
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            code: code.to_string(),
            success: false,
        }),
    )
}

fn convert_series(name: &str, series: Series) -> DashboardSeries {
    let points = series
        .into_iter()
        .map(|(date, value)| SeriesPoint::new(date, value))
        .collect();
    DashboardSeries::new(name, points)
}

fn convert_points(series: Series) -> Vec<SeriesPoint> {
    series
        .into_iter()
        .map(|(date, value)| SeriesPoint::new(date, value))
        .collect()
}

fn convert_metrics(metrics: MetricSeries) -> ErrorMetricSeries {
    ErrorMetricSeries {
        absolute: metrics.absolute.map(convert_points),
        squared: metrics.squared.map(convert_points),
        cumulative_squared: metrics.cumulative_squared.map(convert_points),
    }
}

fn convert_latest(latest: LatestValue) -> SummaryValue {
    SummaryValue {
        date: latest.date,
        value: latest.value,
    }
}
