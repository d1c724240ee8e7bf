//! Per-row and cumulative error series for aligned column pairs.
//!
//! Inputs are two equally long value slices taken from the same filtered
//! table, so positions line up by construction. Everything here is a pure
//! function; missing observations stay missing in the per-row outputs.

/// `|actual - predicted|` per row; null where either input is null.
pub fn absolute_error(actual: &[Option<f64>], predicted: &[Option<f64>]) -> Vec<Option<f64>> {
    paired(actual, predicted, |a, p| (a - p).abs())
}

/// `(actual - predicted)^2` per row; null where either input is null.
pub fn squared_error(actual: &[Option<f64>], predicted: &[Option<f64>]) -> Vec<Option<f64>> {
    paired(actual, predicted, |a, p| (a - p).powi(2))
}

/// Running sum of squared error.
///
/// Null terms contribute nothing and do not reset the sum: the output is
/// null exactly where the input is, and the running total resumes at the
/// next defined term.
pub fn cumulative_squared_error(squared: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut total = 0.0;
    let mut out = Vec::with_capacity(squared.len());
    for term in squared {
        match term {
            Some(value) => {
                total += value;
                out.push(Some(total));
            }
            None => out.push(None),
        }
    }
    out
}

fn paired<F>(actual: &[Option<f64>], predicted: &[Option<f64>], metric: F) -> Vec<Option<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    actual
        .iter()
        .zip(predicted.iter())
        .map(|pair| match pair {
            (Some(a), Some(p)) => Some(metric(*a, *p)),
            _ => None,
        })
        .collect()
}
