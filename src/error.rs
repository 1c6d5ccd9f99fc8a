use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::fare::BusType;

/// A problem with what the customer typed; shown to them verbatim
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter pickup location (From).")]
    EmptyOrigin,
    #[error("Please enter destination (To).")]
    EmptyDestination,
    #[error("Please enter a valid distance (km).")]
    InvalidDistance,
    #[error("Please enter number of whole days (minimum 1).")]
    InvalidDays,
    #[error("Please select bus type.")]
    InvalidBusType,
}

impl ValidationError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyOrigin => "empty_origin",
            Self::EmptyDestination => "empty_destination",
            Self::InvalidDistance => "invalid_distance",
            Self::InvalidDays => "invalid_days",
            Self::InvalidBusType => "invalid_bus_type",
        }
    }

    /// The request field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyOrigin => "origin",
            Self::EmptyDestination => "destination",
            Self::InvalidDistance => "distanceKm",
            Self::InvalidDays => "days",
            Self::InvalidBusType => "busType",
        }
    }
}

/// A defect in the deployed pricing configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("No per-km rate configured for bus type {bus_type}")]
    MissingRate { bus_type: BusType },
}

/// Why a validated trip could not be priced
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The fare does not fit in a whole-unit amount
    #[error("Fare for {billable_km} km at {rate_per_km}/km is out of range")]
    AmountOutOfRange { billable_km: f64, rate_per_km: f64 },
}

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Customer input rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Pricing configuration is broken
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match &self {
            Self::Validation(err) => json!({
                "error": {
                    "message": err.to_string(),
                    "type": err.code(),
                    "field": err.field(),
                }
            }),
            _ => json!({
                "error": {
                    "message": self.to_string(),
                    "type": error_type_name(&self),
                }
            }),
        };

        let status = match &self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Configuration(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(body)).into_response()
    }
}

fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::Validation(err) => err.code(),
        AppError::Configuration(_) => "configuration_error",
        AppError::Internal(_) => "internal_error",
    }
}

/// An unquotable amount comes from an absurd distance, so the customer sees
/// the distance error rather than a server fault
impl From<EstimateError> for AppError {
    fn from(err: EstimateError) -> Self {
        match err {
            EstimateError::Configuration(err) => Self::Configuration(err),
            EstimateError::AmountOutOfRange { .. } => {
                Self::Validation(ValidationError::InvalidDistance)
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_user_facing() {
        assert_eq!(
            ValidationError::InvalidDistance.to_string(),
            "Please enter a valid distance (km)."
        );
        assert_eq!(
            AppError::from(ValidationError::EmptyOrigin).to_string(),
            "Please enter pickup location (From)."
        );
    }

    #[test]
    fn test_configuration_error_display() {
        let error = AppError::from(ConfigurationError::MissingRate {
            bus_type: BusType::new(44),
        });
        assert_eq!(
            error.to_string(),
            "Configuration error: No per-km rate configured for bus type 44"
        );
    }

    #[test]
    fn test_error_type_name() {
        assert_eq!(
            error_type_name(&AppError::Validation(ValidationError::InvalidDays)),
            "invalid_days"
        );
        assert_eq!(
            error_type_name(&AppError::Internal("boom".to_string())),
            "internal_error"
        );
    }

    #[tokio::test]
    async fn test_error_response_status() {
        let response = AppError::from(ValidationError::InvalidBusType).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = AppError::from(ConfigurationError::MissingRate {
            bus_type: BusType::new(20),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_estimate_error_conversion() {
        let error = AppError::from(EstimateError::AmountOutOfRange {
            billable_km: 1e308,
            rate_per_km: 24.0,
        });
        assert!(matches!(
            error,
            AppError::Validation(ValidationError::InvalidDistance)
        ));

        let error = AppError::from(EstimateError::from(ConfigurationError::MissingRate {
            bus_type: BusType::new(32),
        }));
        assert!(matches!(error, AppError::Configuration(_)));
    }
}
