use crate::error::ValidationError;
use crate::fare::models::{BusType, FieldValue, FleetEntry, TripRequest, ValidatedRequest};

/// Validate a submitted trip against the offered fleet
///
/// Checks run in form order and stop at the first failure, so the caller
/// always has exactly one message to show.
pub fn validate(
    request: &TripRequest,
    fleet: &[FleetEntry],
) -> Result<ValidatedRequest, ValidationError> {
    let origin = parse_text(request.origin.as_ref()).ok_or(ValidationError::EmptyOrigin)?;
    let destination =
        parse_text(request.destination.as_ref()).ok_or(ValidationError::EmptyDestination)?;
    let distance_km =
        parse_distance(request.distance_km.as_ref()).ok_or(ValidationError::InvalidDistance)?;
    let days = parse_days(request.days.as_ref()).ok_or(ValidationError::InvalidDays)?;
    let bus_type = parse_bus_type(request.bus_type.as_ref())
        .filter(|bus| fleet.iter().any(|entry| entry.seats == *bus))
        .ok_or(ValidationError::InvalidBusType)?;

    Ok(ValidatedRequest {
        origin,
        destination,
        distance_km,
        days,
        bus_type,
    })
}

fn parse_text(value: Option<&FieldValue>) -> Option<String> {
    let text = match value? {
        FieldValue::Text(s) => s.trim().to_string(),
        FieldValue::Number(n) => n.to_string(),
        FieldValue::Other(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn parse_distance(value: Option<&FieldValue>) -> Option<f64> {
    let km = match value? {
        FieldValue::Number(n) => *n,
        FieldValue::Text(s) => s.trim().parse::<f64>().ok()?,
        FieldValue::Other(_) => return None,
    };
    (km.is_finite() && km > 0.0).then_some(km)
}

fn parse_days(value: Option<&FieldValue>) -> Option<u32> {
    let days = match value? {
        FieldValue::Number(n) => whole_number(*n)?,
        FieldValue::Text(s) => s.trim().parse::<u32>().ok()?,
        FieldValue::Other(_) => return None,
    };
    (days >= 1).then_some(days)
}

fn parse_bus_type(value: Option<&FieldValue>) -> Option<BusType> {
    match value? {
        FieldValue::Number(n) => whole_number(*n).map(BusType::new),
        FieldValue::Text(s) => s.parse().ok(),
        FieldValue::Other(_) => None,
    }
}

fn whole_number(n: f64) -> Option<u32> {
    if n.fract() == 0.0 && n >= 0.0 && n <= f64::from(u32::MAX) {
        Some(n as u32)
    } else {
        None
    }
}
