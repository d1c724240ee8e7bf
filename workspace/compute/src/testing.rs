//! Reusable builders for tests.
//!
//! Panics are fine here; every caller is a test asserting on known-good
//! inputs.

use chrono::{Datelike, NaiveDate};
use model::{DatasetConfig, HorizonShift, Region, ValueUnit};

use crate::table::{BENCHMARK_PREDICTION, MODEL_PREDICTION, TARGET, TimeSeriesTable};

/// First-of-month date.
pub fn month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

/// `count` consecutive first-of-month dates starting at `year`-`start`.
pub fn months(year: i32, start: u32, count: usize) -> Vec<NaiveDate> {
    let mut out = Vec::with_capacity(count);
    let mut current = month(year, start);
    for _ in 0..count {
        out.push(current);
        let next_year = current.year() + (current.month() / 12) as i32;
        let next_month = (current.month() % 12) + 1;
        current = NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap();
    }
    out
}

/// Canonical three-column table over consecutive months.
pub fn canonical_table(
    year: i32,
    start: u32,
    target: Vec<Option<f64>>,
    model: Vec<Option<f64>>,
    benchmark: Vec<Option<f64>>,
) -> TimeSeriesTable {
    assert_eq!(target.len(), model.len());
    assert_eq!(target.len(), benchmark.len());
    let rows = months(year, start, target.len())
        .into_iter()
        .zip(target.into_iter().zip(model).zip(benchmark))
        .map(|(date, ((t, m), b))| (date, vec![t, m, b]))
        .collect::<Vec<_>>();
    TimeSeriesTable::from_rows(&[TARGET, MODEL_PREDICTION, BENCHMARK_PREDICTION], rows)
        .unwrap()
}

/// A euro-area-style dataset config with no horizon shifts and no
/// display rescaling, so tests opt into exactly what they exercise.
pub fn test_dataset_config() -> DatasetConfig {
    DatasetConfig {
        region: Region::EuroAreaInflation,
        display_name: "Euro area inflation (HICP, y/y)".to_string(),
        table_file: "euro-area-inflation.csv".to_string(),
        errors_file: "euro-area-inflation-errors.csv".to_string(),
        date_column: "date".to_string(),
        target_column: "inflation".to_string(),
        model_column: "pred_signal_llama_70b".to_string(),
        benchmark_column: "pred_swap".to_string(),
        model_shift: HorizonShift::none(),
        benchmark_shift: HorizonShift::none(),
        unit: ValueUnit::Percent,
    }
}
