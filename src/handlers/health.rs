use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::handlers::AppState;

/// Health check endpoint
/// Returns 200 OK if the service is running
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "service": "coach-fare",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Readiness check endpoint
/// Ready once a configuration with at least one priced bus is loaded
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.config.load();
    let priced = config
        .fleet
        .iter()
        .filter(|entry| config.pricing.rate_for(entry.seats).is_some())
        .count();

    if priced == 0 {
        return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({
            "status": "not_ready",
            "service": "coach-fare",
        })));
    }

    (StatusCode::OK, Json(json!({
        "status": "ready",
        "service": "coach-fare",
        "buses": priced,
    })))
}
