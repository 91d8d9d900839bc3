#[macro_use]
extern crate rust_i18n;

mod commands;
mod shutdown;
mod startup;

use clap::Parser;
use tracing::info;

// Initialize i18n
i18n!("locales", fallback = "en");

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    let cli = commands::Cli::parse();

    // Load configuration
    let config = startup::load_config(cli.settings.clone())?;

    info!("Starting dayglance");

    commands::run(cli.command, config).await?;

    Ok(())
}
