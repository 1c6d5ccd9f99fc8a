use anyhow::Result;
use coach_fare::config;
use colored::Colorize;
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Prints the effective configuration (file plus environment overrides)
pub fn show(config_path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!("Loading configuration for display");

    let cfg = config::load_config(config_path)?;

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&cfg)?;
    println!("{}", toml_string);

    info!("Configuration displayed successfully");
    Ok(())
}

/// Execute the config validate command
///
/// Validates the configuration file
pub fn validate(config_path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());
    info!("Validating configuration file");

    let cfg = config::load_config(config_path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  Buses: {}", cfg.fleet.len());
    println!("  Rates: {}", cfg.pricing.rates.len());
    println!("  Unused rates: {}", count_unused_rates(&cfg));

    info!("Configuration validation successful");
    Ok(())
}

/// Rates configured for bus types the fleet does not offer
fn count_unused_rates(cfg: &config::Config) -> usize {
    cfg.pricing
        .rates
        .keys()
        .filter(|bus_type| cfg.bus_label(**bus_type).is_none())
        .count()
}
