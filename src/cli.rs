use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use commands::{check_data, serve};

#[derive(Parser)]
#[command(name = "macrodash")]
#[command(about = "Macrodash application with CLI tools and web server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,

        /// Directory holding the region data files
        #[arg(short, long, env = "MACRODASH_DATA_DIR", default_value = "./data")]
        data_dir: PathBuf,

        /// YAML file replacing the built-in dataset registry
        ///
        /// Each entry configures one region: its data files, column names,
        /// per-series horizon shifts and display unit.
        #[arg(long, env = "MACRODASH_DATASETS")]
        datasets: Option<PathBuf>,
    },
    /// Check that every configured dataset loads cleanly
    ///
    /// Reads each region's table and error sample the same way the server
    /// does and reports row counts and date coverage.
    Check {
        /// Directory holding the region data files
        #[arg(short, long, env = "MACRODASH_DATA_DIR", default_value = "./data")]
        data_dir: PathBuf,

        /// YAML file replacing the built-in dataset registry
        #[arg(long, env = "MACRODASH_DATASETS")]
        datasets: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { bind_address, data_dir, datasets } => {
                serve(&bind_address, data_dir, datasets).await?;
            }
            Commands::Check { data_dir, datasets } => {
                check_data(&data_dir, datasets)?;
            }
        }
        Ok(())
    }
}
