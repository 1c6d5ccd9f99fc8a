use axum::{extract::State, Json};
use serde::Serialize;

use crate::fare::BusType;
use crate::handlers::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRules {
    pub business: String,
    pub contact_phone: String,
    pub currency_symbol: String,
    pub daily_allowance: u32,
    pub long_trip_threshold_km: f64,
    pub min_km_per_day: f64,
    pub buses: Vec<BusRate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusRate {
    pub bus_type: BusType,
    pub label: String,
    /// `None` when the rate table has no entry for this bus
    pub rate_per_km: Option<f64>,
}

/// Handle GET /v1/fleet
/// Lists the offered buses with their current per-km rates
pub async fn list_fleet(State(state): State<AppState>) -> Json<PriceRules> {
    let config = state.config.load();

    let buses = config
        .fleet
        .iter()
        .map(|entry| BusRate {
            bus_type: entry.seats,
            label: entry.label.clone(),
            rate_per_km: config.pricing.rate_for(entry.seats),
        })
        .collect();

    Json(PriceRules {
        business: config.business.name.clone(),
        contact_phone: config.business.phone.clone(),
        currency_symbol: config.business.currency_symbol.clone(),
        daily_allowance: config.pricing.daily_allowance,
        long_trip_threshold_km: config.pricing.long_trip_threshold_km,
        min_km_per_day: config.pricing.min_km_per_day,
        buses,
    })
}
