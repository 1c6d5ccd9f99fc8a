use anyhow::Result;
use coach_fare::config::{self, Config};
use coach_fare::error::{EstimateError, ValidationError};
use coach_fare::fare::{self, format_amount, Quote, TripRequest};
use colored::Colorize;
use std::path::Path;
use tracing::{error, info};

use crate::cli::QuoteArgs;

/// Execute the quote command
///
/// Runs the same validation and pricing as `POST /v1/estimate` and prints
/// the line-item breakdown. Invalid input exits non-zero with the message
/// the web form would show.
pub fn execute(config_path: &Path, args: QuoteArgs) -> Result<()> {
    let cfg = config::load_config(config_path)?;

    let request = TripRequest {
        origin: Some(args.from.into()),
        destination: Some(args.to.into()),
        distance_km: Some(args.distance.into()),
        days: Some(args.days.into()),
        bus_type: Some(args.bus.into()),
    };

    let validated = match fare::validate(&request, &cfg.fleet) {
        Ok(validated) => validated,
        Err(err) => {
            println!("{} {}", "✗".red(), err.to_string().red());
            anyhow::bail!("invalid trip ({})", err.code());
        }
    };

    let quote = match fare::estimate(&validated, &cfg.pricing) {
        Ok(quote) => quote,
        Err(err @ EstimateError::AmountOutOfRange { .. }) => {
            let shown = ValidationError::InvalidDistance;
            println!("{} {}", "✗".red(), shown.to_string().red());
            anyhow::bail!("invalid trip ({}): {}", shown.code(), err);
        }
        Err(err) => {
            error!("Pricing configuration fault: {}", err);
            return Err(err.into());
        }
    };
    info!(outcome = quote.outcome(), "Quote computed");

    println!(
        "{} {} → {}",
        "Trip:".bold(),
        validated.origin(),
        validated.destination()
    );
    println!(
        "{} {}",
        "Bus:".bold(),
        cfg.bus_label(validated.bus_type()).unwrap_or("(unlabelled)")
    );
    println!();

    for line in breakdown_lines(&quote, &cfg) {
        println!("{}", line);
    }
    println!();
    println!(
        "{}",
        fare::quote_note(&quote, &cfg.pricing, &cfg.business.currency_symbol).dimmed()
    );
    println!("{} {}", "Call:".bold(), cfg.business.phone);

    Ok(())
}

/// Plain-text rows of the breakdown panel
fn breakdown_lines(quote: &Quote, cfg: &Config) -> Vec<String> {
    let symbol = cfg.business.currency_symbol.as_str();
    let days = quote.days();
    let plural = if days > 1 { "s" } else { "" };
    let allowance = format!(
        "  DA Permit ({} day{}): {}",
        days,
        plural,
        format_amount(quote.daily_allowance_total(), symbol)
    );

    match quote {
        Quote::Priced(q) => vec![
            format!(
                "  Billable distance: {} km @ {}{}/km",
                q.billable_km, symbol, q.rate_per_km
            ),
            format!("  Base (computed): {}", format_amount(q.base_cost, symbol)),
            allowance,
            format!("  Estimated Total: {}", format_amount(q.total, symbol)),
        ],
        Quote::Manual(_) => vec!["  Custom Quote Required".to_string(), allowance],
    }
}
