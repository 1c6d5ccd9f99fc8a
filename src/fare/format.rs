use crate::fare::models::{Quote, RateTable};

/// Format a whole-currency amount with Indian digit grouping
///
/// The last three digits form one group and the rest are grouped in pairs:
/// `4650000` becomes `46,50,000`.
pub fn format_amount(amount: u64, symbol: &str) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("{}{}", symbol, digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{}{},{}", symbol, groups.join(","), tail)
}

/// Customer-facing note shown under the breakdown
pub fn quote_note(quote: &Quote, rates: &RateTable, symbol: &str) -> String {
    match quote {
        Quote::Priced(q) if q.days > 1 => format!(
            "Multi-day booking: minimum {} km/day enforced for billing where necessary.",
            rates.min_km_per_day
        ),
        Quote::Priced(q) => format!("Per-km rate applied at {}{}/km.", symbol, q.rate_per_km),
        Quote::Manual(_) => format!(
            "Per-km rates apply for trips ≥ {} km or multi-day bookings. Please call us for a custom quote.",
            rates.long_trip_threshold_km
        ),
    }
}
