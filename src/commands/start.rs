use anyhow::Result;
use coach_fare::{config, server};
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

/// Execute the start command
///
/// Loads and validates the configuration, then serves until a shutdown
/// signal arrives. The path is kept so SIGHUP can reload the same file.
pub async fn execute(config_path: PathBuf) -> Result<()> {
    println!("{}", "Starting coach fare service...".green());

    let cfg = config::load_config(&config_path)?;
    info!(
        "Loaded configuration from {} ({} buses)",
        config_path.display(),
        cfg.fleet.len()
    );

    server::start_server(cfg, config_path).await?;

    Ok(())
}
