//! Confidence-band geometry around the newest forecast points.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{ComputeError, Result};

/// Closed quadrilateral around the last two known forecast points.
///
/// Zero height at the second-to-last point, full +-half_width height at
/// the last. The asymmetry is intentional: uncertainty attaches only to
/// the newest, still-unconfirmed forecast, so the band fans out from the
/// last confirmed point.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceBand {
    /// Ring order; the first and last vertex coincide.
    pub vertices: [(NaiveDate, f64); 4],
}

/// Builds the band for an already-filtered forecast series.
///
/// Trailing nulls are skipped when locating the newest points. Fewer
/// than two known points is `InsufficientData`; callers omit the band
/// and render everything else.
pub fn build_band(
    series: &[(NaiveDate, Option<f64>)],
    half_width: f64,
) -> Result<ConfidenceBand> {
    let mut newest = series
        .iter()
        .rev()
        .filter_map(|(date, value)| value.map(|v| (*date, v)));
    let last = newest.next();
    let second_last = newest.next();

    match (second_last, last) {
        (Some((anchor_date, anchor_value)), Some((tip_date, tip_value))) => {
            debug!(
                anchor = %anchor_date,
                tip = %tip_date,
                half_width,
                "building confidence band"
            );
            Ok(ConfidenceBand {
                vertices: [
                    (anchor_date, anchor_value),
                    (tip_date, tip_value - half_width),
                    (tip_date, tip_value + half_width),
                    (anchor_date, anchor_value),
                ],
            })
        }
        _ => Err(ComputeError::InsufficientData(
            "confidence band needs two known forecast points".to_string(),
        )),
    }
}
