use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::{info, debug, trace, error};

use compute::source;

use crate::config::load_registry;

pub fn check_data(data_dir: &Path, datasets: Option<PathBuf>) -> Result<()> {
    trace!("Entering check_data function");
    info!("Checking data directory {}", data_dir.display());

    let registry = load_registry(datasets.as_deref())?;
    debug!("Registry holds {} datasets", registry.len());

    let mut failures = 0usize;
    for config in registry.iter() {
        let table_path = data_dir.join(&config.table_file);
        trace!("Loading table {}", table_path.display());
        match source::load_table(&table_path, config) {
            Ok(table) => {
                let span = match (table.dates().first(), table.dates().last()) {
                    (Some(first), Some(last)) => format!("{} to {}", first, last),
                    _ => "empty".to_string(),
                };
                info!(
                    "Region {}: {} rows covering {}",
                    config.region,
                    table.len(),
                    span
                );
            }
            Err(e) => {
                error!("Region {}: table check failed: {}", config.region, e);
                failures += 1;
            }
        }

        let errors_path = data_dir.join(&config.errors_file);
        trace!("Loading error sample {}", errors_path.display());
        match source::load_error_sample(&errors_path) {
            Ok(sample) if sample.len() >= 2 => {
                info!(
                    "Region {}: error sample holds {} observations",
                    config.region,
                    sample.len()
                );
            }
            Ok(sample) => {
                // Too short for a confidence band; the dashboard degrades
                // rather than fails, but it is worth flagging here.
                info!(
                    "Region {}: error sample holds only {} observation(s), no band will render",
                    config.region,
                    sample.len()
                );
            }
            Err(e) => {
                error!("Region {}: error sample check failed: {}", config.region, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} dataset check(s) failed", failures);
    }

    info!("All dataset checks passed!");
    trace!("check_data function completed");

    Ok(())
}
