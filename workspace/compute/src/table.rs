//! Date-keyed wide table of monthly series.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use model::HorizonShift;

use crate::error::{ComputeError, Result};

/// Canonical name of the realized-value column.
pub const TARGET: &str = "target";
/// Canonical name of the ML forecast column.
pub const MODEL_PREDICTION: &str = "model_prediction";
/// Canonical name of the benchmark forecast column.
pub const BENCHMARK_PREDICTION: &str = "benchmark_prediction";

/// In-memory table of monthly rows and named numeric columns.
///
/// Row keys are first-of-month dates, unique and strictly increasing.
/// Any value may be null (a missing observation); the key never is.
/// Tables are immutable value data: shifting and filtering return new
/// instances and never touch the receiver.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesTable {
    dates: Vec<NaiveDate>,
    columns: Vec<(String, Vec<Option<f64>>)>,
}

impl TimeSeriesTable {
    /// Builds a table from ordered rows.
    ///
    /// Dates normalize to the first of their month. Fails when two rows
    /// land in the same month, dates go backwards, or a row's value
    /// count does not match the column list.
    pub fn from_rows<I>(column_names: &[&str], rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NaiveDate, Vec<Option<f64>>)>,
    {
        for (i, name) in column_names.iter().enumerate() {
            if column_names[..i].contains(name) {
                return Err(ComputeError::MalformedInput(format!(
                    "duplicate column name: {}",
                    name
                )));
            }
        }

        let mut dates: Vec<NaiveDate> = Vec::new();
        let mut columns: Vec<(String, Vec<Option<f64>>)> = column_names
            .iter()
            .map(|name| (name.to_string(), Vec::new()))
            .collect();

        for (row, (date, values)) in rows.into_iter().enumerate() {
            if values.len() != columns.len() {
                return Err(ComputeError::MalformedInput(format!(
                    "row {} has {} values, expected {}",
                    row,
                    values.len(),
                    columns.len()
                )));
            }
            let month = month_start(date);
            if let Some(&previous) = dates.last() {
                if month <= previous {
                    return Err(ComputeError::MalformedInput(format!(
                        "dates are not strictly increasing by month at row {} ({})",
                        row, date
                    )));
                }
            }
            dates.push(month);
            for (column, value) in columns.iter_mut().zip(values) {
                column.1.push(value);
            }
        }

        Ok(Self { dates, columns })
    }

    /// Joins independently dated series over the union of their dates.
    ///
    /// Months present in one series and absent in another become nulls
    /// in the sparser column. This is the re-assembly step after
    /// per-series horizon shifts, which move each column's dates
    /// independently.
    pub fn from_columns(series: Vec<(String, Vec<(NaiveDate, Option<f64>)>)>) -> Result<Self> {
        for (i, (name, _)) in series.iter().enumerate() {
            if series[..i].iter().any(|(other, _)| other == name) {
                return Err(ComputeError::MalformedInput(format!(
                    "duplicate column name: {}",
                    name
                )));
            }
        }

        let mut keyed: Vec<(String, BTreeMap<NaiveDate, Option<f64>>)> =
            Vec::with_capacity(series.len());
        let mut keys: BTreeSet<NaiveDate> = BTreeSet::new();
        for (name, points) in series {
            let mut by_month = BTreeMap::new();
            for (date, value) in points {
                let month = month_start(date);
                if by_month.insert(month, value).is_some() {
                    return Err(ComputeError::MalformedInput(format!(
                        "column {} has two entries for {}",
                        name, month
                    )));
                }
                keys.insert(month);
            }
            keyed.push((name, by_month));
        }

        let dates: Vec<NaiveDate> = keys.into_iter().collect();
        let columns = keyed
            .into_iter()
            .map(|(name, by_month)| {
                let values = dates
                    .iter()
                    .map(|date| by_month.get(date).copied().flatten())
                    .collect();
                (name, values)
            })
            .collect();

        Ok(Self { dates, columns })
    }

    /// Returns a new table with every date key offset by `shift`.
    ///
    /// Keys may move before or after the original range; nothing is
    /// clipped here. Clipping is the year filter's job.
    pub fn shifted(&self, shift: HorizonShift) -> Self {
        let months = shift.signed_months();
        Self {
            dates: self.dates.iter().map(|d| shift_month(*d, months)).collect(),
            columns: self.columns.clone(),
        }
    }

    /// Cursor over one column's (date, value) pairs in row order.
    ///
    /// The cursor is restartable: call this again, or clone it, to read
    /// the column from the top.
    pub fn column(&self, name: &str) -> Result<ColumnIter<'_>> {
        let values = self
            .columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, values)| values.as_slice())
            .ok_or_else(|| ComputeError::Configuration(format!("unknown column: {}", name)))?;
        Ok(ColumnIter {
            dates: &self.dates,
            values,
            index: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(column, _)| column == name)
    }

    /// Rows whose date satisfies `keep`, in original order.
    pub(crate) fn retained<F>(&self, keep: F) -> Self
    where
        F: Fn(NaiveDate) -> bool,
    {
        let mask: Vec<bool> = self.dates.iter().map(|date| keep(*date)).collect();
        let dates = self
            .dates
            .iter()
            .zip(&mask)
            .filter(|(_, kept)| **kept)
            .map(|(date, _)| *date)
            .collect();
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| {
                let kept = values
                    .iter()
                    .zip(&mask)
                    .filter(|(_, kept)| **kept)
                    .map(|(value, _)| *value)
                    .collect();
                (name.clone(), kept)
            })
            .collect();
        Self { dates, columns }
    }
}

/// Restartable cursor over one column.
#[derive(Debug, Clone)]
pub struct ColumnIter<'a> {
    dates: &'a [NaiveDate],
    values: &'a [Option<f64>],
    index: usize,
}

impl Iterator for ColumnIter<'_> {
    type Item = (NaiveDate, Option<f64>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.dates.len() {
            return None;
        }
        let item = (self.dates[self.index], self.values[self.index]);
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dates.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ColumnIter<'_> {}

/// First day of the date's month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month.
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap()
}

/// Offsets a first-of-month date by a signed number of months.
fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month() as i32 - 1 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}
