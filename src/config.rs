use anyhow::{Context, Result};
use moka::future::Cache;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use model::{DatasetConfig, DatasetRegistry};

use crate::schemas::AppState;

/// Initialize application configuration and state
pub fn initialize_app_state(data_dir: PathBuf, datasets: Option<PathBuf>) -> Result<AppState> {
    let registry = load_registry(datasets.as_deref())?;
    tracing::info!(
        "Serving {} datasets from {}",
        registry.len(),
        data_dir.display()
    );

    // Initialize cache
    let cache = Cache::builder()
        .max_capacity(1000)
        .time_to_live(Duration::from_secs(300)) // 5 minutes
        .build();

    Ok(AppState {
        registry: Arc::new(registry),
        data_dir,
        cache,
    })
}

/// Load the dataset registry, either the built-in one or a YAML override.
pub fn load_registry(datasets: Option<&Path>) -> Result<DatasetRegistry> {
    match datasets {
        Some(path) => {
            tracing::info!("Loading dataset registry from {}", path.display());
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read dataset file {}", path.display()))?;
            let configs: Vec<DatasetConfig> = serde_yaml::from_str(&raw)
                .with_context(|| format!("invalid dataset file {}", path.display()))?;
            let registry = DatasetRegistry::from_configs(configs)
                .with_context(|| format!("invalid dataset registry in {}", path.display()))?;
            Ok(registry)
        }
        None => Ok(DatasetRegistry::builtin()),
    }
}
