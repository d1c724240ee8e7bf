//! Per-region dataset configuration.
//!
//! A region is one deployable dataset: a CSV table of monthly observations
//! and forecasts plus a flat file of historical forecast errors. The
//! original dashboards special-cased each region in code; here the
//! region-specific pieces (file names, column headers, horizon shifts,
//! unit convention) are data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported datasets. The string form (kebab-case) is what the HTTP API
/// and the registry override file use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    EuroAreaInflation,
    UsInflation,
    EuroAreaUnemployment,
}

impl Region {
    /// All supported regions, in presentation order.
    pub fn all() -> [Region; 3] {
        [
            Region::EuroAreaInflation,
            Region::UsInflation,
            Region::EuroAreaUnemployment,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::EuroAreaInflation => "euro-area-inflation",
            Region::UsInflation => "us-inflation",
            Region::EuroAreaUnemployment => "euro-area-unemployment",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string (path parameter, config file) names no known region.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown region: {0}")]
pub struct UnknownRegion(pub String);

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::all()
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRegion(s.to_string()))
    }
}

/// Which way a horizon shift moves a series along the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftDirection {
    Past,
    Future,
}

/// A whole-month offset applied to every date key of a series.
///
/// Forecast columns are stamped with the date the forecast was issued;
/// shifting re-stamps them onto the period they predict. Each series
/// carries its own shift, so two columns of the same table can move in
/// opposite directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonShift {
    pub months: u32,
    pub direction: ShiftDirection,
}

impl HorizonShift {
    pub fn toward_past(months: u32) -> Self {
        Self {
            months,
            direction: ShiftDirection::Past,
        }
    }

    pub fn toward_future(months: u32) -> Self {
        Self {
            months,
            direction: ShiftDirection::Future,
        }
    }

    /// The identity shift.
    pub fn none() -> Self {
        Self::toward_future(0)
    }

    /// Offset in months with future positive.
    pub fn signed_months(&self) -> i32 {
        match self.direction {
            ShiftDirection::Future => self.months as i32,
            ShiftDirection::Past => -(self.months as i32),
        }
    }

    /// The shift that undoes this one.
    pub fn reversed(&self) -> Self {
        match self.direction {
            ShiftDirection::Future => Self::toward_past(self.months),
            ShiftDirection::Past => Self::toward_future(self.months),
        }
    }

    pub fn is_none(&self) -> bool {
        self.months == 0
    }
}

impl Default for HorizonShift {
    fn default() -> Self {
        Self::none()
    }
}

/// How stored values relate to displayed percentages.
///
/// Inflation tables store fractions (0.052 means 5.2%) and scale by 100
/// for display; unemployment tables already store percentages and must
/// not be re-scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueUnit {
    Fraction,
    Percent,
}

impl ValueUnit {
    /// Factor applied to stored values when presenting them as percentages.
    pub fn display_scale(&self) -> f64 {
        match self {
            ValueUnit::Fraction => 100.0,
            ValueUnit::Percent => 1.0,
        }
    }
}

fn default_date_column() -> String {
    "date".to_string()
}

/// Everything region-specific about one dataset.
///
/// `table_file` and `errors_file` are resolved relative to the data
/// directory. Column fields name the CSV headers of the source table;
/// the loader maps them onto the canonical column names the compute
/// crate works with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub region: Region,
    pub display_name: String,
    pub table_file: String,
    pub errors_file: String,
    /// Header of the date column.
    #[serde(default = "default_date_column")]
    pub date_column: String,
    /// Header of the realized-value column.
    pub target_column: String,
    /// Header of the ML forecast column.
    pub model_column: String,
    /// Header of the benchmark forecast column.
    pub benchmark_column: String,
    /// Horizon alignment for the ML forecast.
    #[serde(default)]
    pub model_shift: HorizonShift,
    /// Horizon alignment for the benchmark forecast.
    #[serde(default)]
    pub benchmark_shift: HorizonShift,
    pub unit: ValueUnit,
}
