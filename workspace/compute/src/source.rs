//! Loaders for the two per-region input files.
//!
//! A region's data arrives as a CSV table (dates plus realized, ML, and
//! benchmark columns under region-specific headers) and a flat file with
//! one historical forecast-error magnitude per line. Both are produced
//! by an external pipeline; everything unreadable counts as malformed
//! input and blocks the request.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use model::DatasetConfig;
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};
use crate::table::{BENCHMARK_PREDICTION, MODEL_PREDICTION, TARGET, TimeSeriesTable};

/// Reads a region's table file into canonical columns.
#[instrument(skip(config), fields(region = %config.region))]
pub fn load_table(path: &Path, config: &DatasetConfig) -> Result<TimeSeriesTable> {
    let file = File::open(path).map_err(|e| {
        ComputeError::MalformedInput(format!("cannot open {}: {}", path.display(), e))
    })?;
    read_table(file, config)
}

/// Reads a table from any CSV source.
///
/// Split from [`load_table`] so tests can feed in-memory CSV. The
/// configured header names are mapped onto the canonical column names
/// here; a missing header is malformed input.
pub fn read_table<R: Read>(reader: R, config: &DatasetConfig) -> Result<TimeSeriesTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let date_index = find_column(&headers, &config.date_column)?;
    let target_index = find_column(&headers, &config.target_column)?;
    let model_index = find_column(&headers, &config.model_column)?;
    let benchmark_index = find_column(&headers, &config.benchmark_column)?;

    let mut rows = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        // Header occupies line 1.
        let line = i + 2;
        let date = parse_date(record.get(date_index).unwrap_or(""), line)?;
        let values = vec![
            parse_value(record.get(target_index).unwrap_or(""), line)?,
            parse_value(record.get(model_index).unwrap_or(""), line)?,
            parse_value(record.get(benchmark_index).unwrap_or(""), line)?,
        ];
        rows.push((date, values));
    }

    debug!(rows = rows.len(), "loaded region table");
    TimeSeriesTable::from_rows(&[TARGET, MODEL_PREDICTION, BENCHMARK_PREDICTION], rows)
}

/// Reads a flat single-column file of historical forecast errors.
#[instrument]
pub fn load_error_sample(path: &Path) -> Result<Vec<f64>> {
    let file = File::open(path).map_err(|e| {
        ComputeError::MalformedInput(format!("cannot open {}: {}", path.display(), e))
    })?;
    read_error_sample(file)
}

/// Reads an error sample from any line-oriented source.
///
/// Blank lines are skipped and a non-numeric first line is tolerated as
/// a header; any later non-numeric line is malformed input.
pub fn read_error_sample<R: Read>(reader: R) -> Result<Vec<f64>> {
    let mut sample = Vec::new();
    for (i, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match trimmed.parse::<f64>() {
            Ok(value) => sample.push(value),
            Err(_) if i == 0 => continue,
            Err(_) => {
                return Err(ComputeError::MalformedInput(format!(
                    "line {}: invalid error magnitude: {:?}",
                    i + 1,
                    trimmed
                )));
            }
        }
    }
    debug!(observations = sample.len(), "loaded uncertainty sample");
    Ok(sample)
}

fn find_column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| ComputeError::MalformedInput(format!("missing required column: {}", name)))
}

/// Accepts `YYYY-MM-DD` or `YYYY-MM`; monthly exports often omit the day.
fn parse_date(raw: &str, line: usize) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d") {
        return Ok(date);
    }
    Err(ComputeError::MalformedInput(format!(
        "line {}: invalid date: {:?}",
        line, raw
    )))
}

fn parse_value(raw: &str, line: usize) -> Result<Option<f64>> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("na") || raw.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    raw.parse::<f64>().map(Some).map_err(|_| {
        ComputeError::MalformedInput(format!("line {}: invalid number: {:?}", line, raw))
    })
}
