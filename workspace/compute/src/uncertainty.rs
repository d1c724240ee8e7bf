//! Interval width from a sample of historical forecast errors.

use tracing::debug;

use crate::error::{ComputeError, Result};

/// Reduces an error sample to a symmetric interval half-width.
///
/// The z-score is a parameter: 1.0 (the default) gives the one-sigma,
/// roughly 68% band the dashboards draw. A caller wanting a different
/// confidence level passes a different multiple instead of patching a
/// constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UncertaintyEstimator {
    z_score: f64,
}

impl UncertaintyEstimator {
    pub fn new(z_score: f64) -> Self {
        Self { z_score }
    }

    /// The one-sigma estimator.
    pub fn one_sigma() -> Self {
        Self::new(1.0)
    }

    pub fn z_score(&self) -> f64 {
        self.z_score
    }

    /// Mean, sample standard deviation, and z-scaled half-width.
    ///
    /// The standard deviation uses the n-1 denominator, so it is
    /// undefined for fewer than two observations.
    pub fn fit(&self, sample: &[f64]) -> Result<UncertaintyFit> {
        if sample.len() < 2 {
            return Err(ComputeError::InsufficientData(format!(
                "uncertainty sample has {} observation(s), need at least 2",
                sample.len()
            )));
        }

        let n = sample.len() as f64;
        let mean = sample.iter().sum::<f64>() / n;
        let variance = sample.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let std_dev = variance.sqrt();
        let fit = UncertaintyFit {
            mean,
            std_dev,
            interval: self.z_score * std_dev,
        };
        debug!(
            observations = sample.len(),
            mean = fit.mean,
            std_dev = fit.std_dev,
            interval = fit.interval,
            "fitted uncertainty sample"
        );
        Ok(fit)
    }
}

impl Default for UncertaintyEstimator {
    fn default() -> Self {
        Self::one_sigma()
    }
}

/// Summary of a fitted error sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UncertaintyFit {
    pub mean: f64,
    /// Sample (n-1) standard deviation
    pub std_dev: f64,
    /// z_score * std_dev; half the band's vertical extent
    pub interval: f64,
}
