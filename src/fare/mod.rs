//! Trip fare estimation
//!
//! Pure functions only: `validate` turns untrusted form fields into a
//! `ValidatedRequest`, `estimate` prices it against an injected `RateTable`.
//! Nothing here performs I/O or holds state between calls.

pub mod calculator;
pub mod format;
pub mod models;
pub mod validate;

pub use calculator::estimate;
pub use format::{format_amount, quote_note};
pub use models::{
    BusType, FieldValue, FleetEntry, ManualQuote, ManualQuoteReason, PricedQuote, Quote, RateTable,
    TripRequest, ValidatedRequest,
};
pub use validate::validate;
