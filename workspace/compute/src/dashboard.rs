//! Pure assembly of one dashboard payload.
//!
//! A controller (the HTTP layer here, but nothing in this module knows
//! that) loads the region's table and error sample, picks the year range
//! and metric toggles, and hands everything in as explicit parameters.
//! No ambient state: two calls with the same inputs produce the same
//! bundle.

use chrono::NaiveDate;
use model::DatasetConfig;
use tracing::{debug, instrument};

use crate::band::{self, ConfidenceBand};
use crate::error::{ComputeError, Result};
use crate::filter;
use crate::metrics;
use crate::table::{BENCHMARK_PREDICTION, MODEL_PREDICTION, TARGET, TimeSeriesTable};
use crate::uncertainty::UncertaintyEstimator;

/// Inclusive year range selected in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

/// Which derived metric views to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricToggles {
    pub absolute_error: bool,
    pub squared_error: bool,
}

/// One dated series extracted from the aligned, filtered table.
pub type Series = Vec<(NaiveDate, Option<f64>)>;

/// Metric series derived for one prediction column; a field is `None`
/// when its view was not requested.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricSeries {
    pub absolute: Option<Series>,
    pub squared: Option<Series>,
    pub cumulative_squared: Option<Series>,
}

/// Latest known observation of a series, scaled for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatestValue {
    pub date: NaiveDate,
    pub value: f64,
}

/// Headline numbers shown above the chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryValues {
    pub latest_actual: Option<LatestValue>,
    pub latest_model_forecast: Option<LatestValue>,
}

/// Everything computed for one region request.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardBundle {
    pub actual: Series,
    pub model_forecast: Series,
    pub benchmark_forecast: Series,
    /// `None` when too few points exist to build one
    pub band: Option<ConfidenceBand>,
    pub model_metrics: MetricSeries,
    pub benchmark_metrics: MetricSeries,
    pub summary: SummaryValues,
}

/// Runs the preparation flow: align horizons, filter, derive metrics and
/// band, summarize.
///
/// Too little data for the band (a short error sample or fewer than two
/// known forecast points in range) degrades gracefully: the band is
/// omitted and everything else still renders. Malformed input and
/// configuration errors propagate.
#[instrument(skip(table, error_sample, config, estimator), fields(region = %config.region))]
pub fn assemble(
    table: &TimeSeriesTable,
    error_sample: &[f64],
    config: &DatasetConfig,
    range: YearRange,
    toggles: MetricToggles,
    estimator: &UncertaintyEstimator,
) -> Result<DashboardBundle> {
    let aligned = align_horizons(table, config)?;
    let filtered = filter::filter_years(&aligned, range.start, range.end);
    debug!(
        rows_loaded = table.len(),
        rows_aligned = aligned.len(),
        rows_filtered = filtered.len(),
        "prepared table"
    );

    let actual: Series = filtered.column(TARGET)?.collect();
    let model_forecast: Series = filtered.column(MODEL_PREDICTION)?.collect();
    let benchmark_forecast: Series = filtered.column(BENCHMARK_PREDICTION)?.collect();

    let model_metrics = derive_metrics(&actual, &model_forecast, toggles);
    let benchmark_metrics = derive_metrics(&actual, &benchmark_forecast, toggles);

    let band = match estimator
        .fit(error_sample)
        .and_then(|fit| band::build_band(&model_forecast, fit.interval))
    {
        Ok(band) => Some(band),
        Err(ComputeError::InsufficientData(reason)) => {
            debug!(reason, "omitting confidence band");
            None
        }
        Err(e) => return Err(e),
    };

    let scale = config.unit.display_scale();
    let summary = SummaryValues {
        latest_actual: latest_value(&actual, scale),
        latest_model_forecast: latest_value(&model_forecast, scale),
    };

    Ok(DashboardBundle {
        actual,
        model_forecast,
        benchmark_forecast,
        band,
        model_metrics,
        benchmark_metrics,
        summary,
    })
}

/// Re-keys each forecast column by its configured shift and joins the
/// three series back together over the union of their dates.
fn align_horizons(table: &TimeSeriesTable, config: &DatasetConfig) -> Result<TimeSeriesTable> {
    let target: Series = table.column(TARGET)?.collect();
    let model: Series = table
        .shifted(config.model_shift)
        .column(MODEL_PREDICTION)?
        .collect();
    let benchmark: Series = table
        .shifted(config.benchmark_shift)
        .column(BENCHMARK_PREDICTION)?
        .collect();

    TimeSeriesTable::from_columns(vec![
        (TARGET.to_string(), target),
        (MODEL_PREDICTION.to_string(), model),
        (BENCHMARK_PREDICTION.to_string(), benchmark),
    ])
}

fn derive_metrics(actual: &Series, predicted: &Series, toggles: MetricToggles) -> MetricSeries {
    let dates: Vec<NaiveDate> = actual.iter().map(|(date, _)| *date).collect();
    let actual_values: Vec<Option<f64>> = actual.iter().map(|(_, value)| *value).collect();
    let predicted_values: Vec<Option<f64>> = predicted.iter().map(|(_, value)| *value).collect();

    let mut out = MetricSeries::default();
    if toggles.absolute_error {
        out.absolute = Some(with_dates(
            &dates,
            metrics::absolute_error(&actual_values, &predicted_values),
        ));
    }
    if toggles.squared_error {
        let squared = metrics::squared_error(&actual_values, &predicted_values);
        out.cumulative_squared = Some(with_dates(
            &dates,
            metrics::cumulative_squared_error(&squared),
        ));
        out.squared = Some(with_dates(&dates, squared));
    }
    out
}

fn with_dates(dates: &[NaiveDate], values: Vec<Option<f64>>) -> Series {
    dates.iter().copied().zip(values).collect()
}

fn latest_value(series: &Series, scale: f64) -> Option<LatestValue> {
    series.iter().rev().find_map(|(date, value)| {
        value.map(|v| LatestValue {
            date: *date,
            value: v * scale,
        })
    })
}
