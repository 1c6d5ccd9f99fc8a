use crate::error::{ConfigurationError, EstimateError};
use crate::fare::models::{ManualQuote, ManualQuoteReason, PricedQuote, Quote, RateTable, ValidatedRequest};
use tracing::debug;

/// Price a validated trip against a rate table
///
/// Single-day trips below the long-trip threshold get a manual quote; every
/// other trip is billed per km with the multi-day floor applied. A bus type
/// missing from the table is a deployment fault and is reported as such,
/// never priced at zero. A fare too large for a whole-unit amount is
/// rejected instead of clamped.
pub fn estimate(request: &ValidatedRequest, rates: &RateTable) -> Result<Quote, EstimateError> {
    let bus_type = request.bus_type();
    let rate_per_km = rates
        .rate_for(bus_type)
        .ok_or(ConfigurationError::MissingRate { bus_type })?;

    let distance_km = request.distance_km();
    let days = request.days();
    let daily_allowance_total = rates.daily_allowance_total(days);

    if !rates.is_eligible(distance_km, days) {
        debug!(
            bus_type = %bus_type,
            distance_km,
            days,
            "Trip below long-trip threshold, manual quote required"
        );
        return Ok(Quote::Manual(ManualQuote {
            bus_type,
            days,
            distance_km,
            reason: ManualQuoteReason::BelowThresholdSingleDay,
            daily_allowance_total,
        }));
    }

    let billable_km = rates.billable_km(distance_km, days);
    let out_of_range = || EstimateError::AmountOutOfRange {
        billable_km,
        rate_per_km,
    };

    // Positive inputs make this round-half-up
    let rounded = (billable_km * rate_per_km).round();
    if !rounded.is_finite() || rounded >= u64::MAX as f64 {
        return Err(out_of_range());
    }
    let base_cost = rounded as u64;
    let total = base_cost
        .checked_add(daily_allowance_total)
        .ok_or_else(out_of_range)?;

    debug!(
        bus_type = %bus_type,
        distance_km,
        billable_km,
        days,
        base_cost,
        total,
        "Trip priced per km"
    );

    Ok(Quote::Priced(PricedQuote {
        bus_type,
        days,
        distance_km,
        billable_km,
        min_km_per_day_applied: billable_km > distance_km,
        rate_per_km,
        base_cost,
        daily_allowance_total,
        total,
    }))
}
