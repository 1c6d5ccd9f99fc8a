use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::{
    error::{AppError, EstimateError, ValidationError},
    fare::{self, Quote, TripRequest},
    handlers::AppState,
    metrics,
};

/// Quote breakdown plus the text the form renders beside it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    #[serde(flatten)]
    pub quote: Quote,
    pub bus_label: String,
    pub message: String,
    pub contact_phone: String,
}

/// Handle POST /v1/estimate
///
/// Validation and pricing use the same configuration snapshot, so a reload
/// in the middle of a request cannot mix two rate tables.
pub async fn handle_estimate(
    State(state): State<AppState>,
    Json(request): Json<TripRequest>,
) -> Result<Json<EstimateResponse>, AppError> {
    let config = state.config.load_full();

    let validated = fare::validate(&request, &config.fleet).map_err(|err| {
        info!(kind = err.code(), "Estimate request rejected");
        metrics::record_validation_error(err.code());
        err
    })?;

    let bus_type = validated.bus_type();
    let quote = fare::estimate(&validated, &config.pricing).map_err(|err| {
        match &err {
            EstimateError::Configuration(_) => {
                error!(bus_type = %bus_type, "Pricing configuration fault: {}", err);
                metrics::record_estimate("configuration_error", &bus_type.to_string());
            }
            EstimateError::AmountOutOfRange { .. } => {
                info!(bus_type = %bus_type, "Estimate request rejected: {}", err);
                metrics::record_validation_error(ValidationError::InvalidDistance.code());
            }
        }
        err
    })?;

    metrics::record_estimate(quote.outcome(), &quote.bus_type().to_string());
    info!(
        origin = validated.origin(),
        destination = validated.destination(),
        bus_type = %bus_type,
        days = validated.days(),
        outcome = quote.outcome(),
        total = ?quote.total(),
        "Estimate served"
    );

    let bus_label = config.bus_label(bus_type).map(str::to_string).unwrap_or_else(|| {
        warn!(bus_type = %bus_type, "Validated bus type has no fleet label");
        format!("{} Seater", bus_type)
    });
    let message = fare::quote_note(&quote, &config.pricing, &config.business.currency_symbol);

    Ok(Json(EstimateResponse {
        quote,
        bus_label,
        message,
        contact_phone: config.business.phone.clone(),
    }))
}
