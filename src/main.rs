use clap::Parser;
use anyhow::Result;

mod cli;
mod config;
mod handlers;
mod helpers;
mod router;
mod schemas;

mod tests;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap resolves env-backed arguments
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.run().await?;

    Ok(())
}
