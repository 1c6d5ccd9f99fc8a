use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::fare::{BusType, FleetEntry, RateTable};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub business: BusinessConfig,
    pub fleet: Vec<FleetEntry>,
    pub pricing: RateTable,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BusinessConfig {
    pub name: String,
    pub phone: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub endpoint: String,
}

impl Config {
    pub fn bus_label(&self, bus_type: BusType) -> Option<&str> {
        self.fleet
            .iter()
            .find(|entry| entry.seats == bus_type)
            .map(|entry| entry.label.as_str())
    }
}

/// Load configuration from a TOML file, overridden by `COACH_FARE__*` env vars
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix("COACH_FARE").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.fleet.is_empty() {
        anyhow::bail!("At least one bus must be configured in the fleet");
    }

    let mut seen = HashSet::new();
    for entry in &cfg.fleet {
        if !seen.insert(entry.seats) {
            anyhow::bail!("Bus type {} is listed more than once in the fleet", entry.seats);
        }
        if entry.label.trim().is_empty() {
            anyhow::bail!("Bus type {} has an empty label", entry.seats);
        }
        if !cfg.pricing.rates.contains_key(&entry.seats) {
            anyhow::bail!("Bus type {} has no per-km rate in [pricing.rates]", entry.seats);
        }
    }

    for (bus_type, rate) in &cfg.pricing.rates {
        if !rate.is_finite() || *rate <= 0.0 {
            anyhow::bail!("Rate for bus type {} must be a positive number, got {}", bus_type, rate);
        }
    }

    let pricing = &cfg.pricing;
    if !pricing.long_trip_threshold_km.is_finite() || pricing.long_trip_threshold_km < 0.0 {
        anyhow::bail!("pricing.long_trip_threshold_km must be a non-negative number");
    }
    if !pricing.min_km_per_day.is_finite() || pricing.min_km_per_day < 0.0 {
        anyhow::bail!("pricing.min_km_per_day must be a non-negative number");
    }

    if cfg.metrics.enabled && !cfg.metrics.endpoint.starts_with('/') {
        anyhow::bail!("metrics.endpoint must start with '/'");
    }

    Ok(())
}
