//! The set of configured datasets.

use thiserror::Error;
use tracing::debug;

use crate::dataset::{DatasetConfig, HorizonShift, Region, ValueUnit};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two configs claim the same region.
    #[error("duplicate dataset entry for region: {0}")]
    DuplicateRegion(Region),
    /// A registry with no datasets cannot serve anything.
    #[error("dataset registry is empty")]
    Empty,
}

/// Lookup table from region to its dataset configuration.
///
/// Deployments start from [`DatasetRegistry::builtin`] or replace it
/// wholesale with configs parsed from a YAML file.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRegistry {
    datasets: Vec<DatasetConfig>,
}

impl DatasetRegistry {
    /// The datasets the original dashboards shipped with.
    pub fn builtin() -> Self {
        let datasets = vec![
            DatasetConfig {
                region: Region::EuroAreaInflation,
                display_name: "Euro area inflation (HICP, y/y)".to_string(),
                table_file: "euro-area-inflation.csv".to_string(),
                errors_file: "euro-area-inflation-errors.csv".to_string(),
                date_column: "date".to_string(),
                target_column: "inflation".to_string(),
                model_column: "pred_signal_llama_70b".to_string(),
                benchmark_column: "pred_swap".to_string(),
                model_shift: HorizonShift::toward_past(1),
                benchmark_shift: HorizonShift::toward_past(1),
                unit: ValueUnit::Fraction,
            },
            DatasetConfig {
                region: Region::UsInflation,
                display_name: "US inflation (CPI, y/y)".to_string(),
                table_file: "us-inflation.csv".to_string(),
                errors_file: "us-inflation-errors.csv".to_string(),
                date_column: "date".to_string(),
                target_column: "inflation".to_string(),
                model_column: "pred_signal_llama_70b".to_string(),
                // The autoregressive benchmark is produced already aligned.
                benchmark_column: "pred_ar".to_string(),
                model_shift: HorizonShift::toward_past(1),
                benchmark_shift: HorizonShift::none(),
                unit: ValueUnit::Fraction,
            },
            DatasetConfig {
                region: Region::EuroAreaUnemployment,
                display_name: "Euro area unemployment rate".to_string(),
                table_file: "euro-area-unemployment.csv".to_string(),
                errors_file: "euro-area-unemployment-errors.csv".to_string(),
                date_column: "date".to_string(),
                target_column: "unemployment".to_string(),
                model_column: "pred_signal_llama_70b".to_string(),
                benchmark_column: "pred_ar".to_string(),
                model_shift: HorizonShift::toward_past(1),
                benchmark_shift: HorizonShift::toward_past(1),
                unit: ValueUnit::Percent,
            },
        ];

        // Builtin entries are one-per-region by construction.
        Self { datasets }
    }

    /// Builds a registry from externally supplied configs.
    pub fn from_configs(datasets: Vec<DatasetConfig>) -> Result<Self, RegistryError> {
        if datasets.is_empty() {
            return Err(RegistryError::Empty);
        }
        for (i, config) in datasets.iter().enumerate() {
            if datasets[..i].iter().any(|c| c.region == config.region) {
                return Err(RegistryError::DuplicateRegion(config.region));
            }
        }
        debug!(count = datasets.len(), "dataset registry loaded");
        Ok(Self { datasets })
    }

    pub fn get(&self, region: Region) -> Option<&DatasetConfig> {
        self.datasets.iter().find(|c| c.region == region)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatasetConfig> {
        self.datasets.iter()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_region() {
        let registry = DatasetRegistry::builtin();
        for region in Region::all() {
            let config = registry.get(region).unwrap();
            assert_eq!(config.region, region);
            assert!(!config.table_file.is_empty());
            assert!(!config.errors_file.is_empty());
        }
        assert_eq!(registry.len(), Region::all().len());
    }

    #[test]
    fn test_unemployment_is_not_rescaled() {
        let registry = DatasetRegistry::builtin();
        let config = registry.get(Region::EuroAreaUnemployment).unwrap();
        assert_eq!(config.unit.display_scale(), 1.0);
    }

    #[test]
    fn test_duplicate_region_is_rejected() {
        let config = DatasetRegistry::builtin()
            .get(Region::UsInflation)
            .unwrap()
            .clone();
        let err = DatasetRegistry::from_configs(vec![config.clone(), config]).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateRegion(Region::UsInflation));
    }

    #[test]
    fn test_empty_registry_is_rejected() {
        assert_eq!(
            DatasetRegistry::from_configs(Vec::new()).unwrap_err(),
            RegistryError::Empty
        );
    }
}
