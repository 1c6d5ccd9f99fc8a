use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Coach size, identified by its seat count (20, 32, 44, ...)
///
/// Serialized as a string so it can key TOML tables; deserialized from either
/// a string or an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BusType(u32);

impl BusType {
    pub const fn new(seats: u32) -> Self {
        Self(seats)
    }

    pub fn seats(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BusType {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(Self)
    }
}

impl Serialize for BusType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BusType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BusTypeVisitor;

        impl<'de> Visitor<'de> for BusTypeVisitor {
            type Value = BusType;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a seat count as an integer or a string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<BusType, E> {
                u32::try_from(v)
                    .map(BusType)
                    .map_err(|_| E::custom(format!("seat count out of range: {}", v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<BusType, E> {
                u32::try_from(v)
                    .map(BusType)
                    .map_err(|_| E::custom(format!("seat count out of range: {}", v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<BusType, E> {
                v.parse()
                    .map_err(|_| E::custom(format!("invalid seat count: {:?}", v)))
            }
        }

        deserializer.deserialize_any(BusTypeVisitor)
    }
}

/// One coach the business offers
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FleetEntry {
    pub seats: BusType,
    pub label: String,
}

/// Pricing configuration consumed read-only by the estimator
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RateTable {
    /// Fixed per-day charge (driver allowance / permit), whole currency units
    pub daily_allowance: u32,
    /// Single-day trips at or above this distance are priced per km
    pub long_trip_threshold_km: f64,
    /// Billable floor per day for multi-day trips
    pub min_km_per_day: f64,
    /// Per-km rate for each bus type
    pub rates: BTreeMap<BusType, f64>,
}

impl RateTable {
    pub fn rate_for(&self, bus_type: BusType) -> Option<f64> {
        self.rates.get(&bus_type).copied()
    }

    /// Per-km billing applies to long single-day trips and to every multi-day trip
    pub fn is_eligible(&self, distance_km: f64, days: u32) -> bool {
        distance_km >= self.long_trip_threshold_km || days > 1
    }

    pub fn billable_km(&self, distance_km: f64, days: u32) -> f64 {
        if days > 1 {
            distance_km.max(self.min_km_per_day * f64::from(days))
        } else {
            distance_km
        }
    }

    pub fn daily_allowance_total(&self, days: u32) -> u64 {
        u64::from(self.daily_allowance) * u64::from(days)
    }
}

/// A raw form value: text from an input box, a JSON number, or anything else
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Untrusted trip details as submitted by the estimate form
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    #[serde(default, alias = "from")]
    pub origin: Option<FieldValue>,
    #[serde(default, alias = "to")]
    pub destination: Option<FieldValue>,
    #[serde(default, alias = "distance")]
    pub distance_km: Option<FieldValue>,
    #[serde(default)]
    pub days: Option<FieldValue>,
    #[serde(default)]
    pub bus_type: Option<FieldValue>,
}

/// Trip details that passed validation; only `validate` builds one
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub(crate) origin: String,
    pub(crate) destination: String,
    pub(crate) distance_km: f64,
    pub(crate) days: u32,
    pub(crate) bus_type: BusType,
}

impl ValidatedRequest {
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn bus_type(&self) -> BusType {
        self.bus_type
    }
}

/// Why a trip could not be priced automatically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManualQuoteReason {
    BelowThresholdSingleDay,
}

/// Line-item breakdown of an automatically priced trip
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedQuote {
    pub bus_type: BusType,
    pub days: u32,
    pub distance_km: f64,
    pub billable_km: f64,
    pub min_km_per_day_applied: bool,
    pub rate_per_km: f64,
    pub base_cost: u64,
    pub daily_allowance_total: u64,
    pub total: u64,
}

/// A trip that needs a custom quote; the allowance is still reported
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualQuote {
    pub bus_type: BusType,
    pub days: u32,
    pub distance_km: f64,
    pub reason: ManualQuoteReason,
    pub daily_allowance_total: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Quote {
    Priced(PricedQuote),
    Manual(ManualQuote),
}

impl Quote {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Priced(_))
    }

    pub fn total(&self) -> Option<u64> {
        match self {
            Self::Priced(q) => Some(q.total),
            Self::Manual(_) => None,
        }
    }

    pub fn daily_allowance_total(&self) -> u64 {
        match self {
            Self::Priced(q) => q.daily_allowance_total,
            Self::Manual(q) => q.daily_allowance_total,
        }
    }

    pub fn bus_type(&self) -> BusType {
        match self {
            Self::Priced(q) => q.bus_type,
            Self::Manual(q) => q.bus_type,
        }
    }

    pub fn days(&self) -> u32 {
        match self {
            Self::Priced(q) => q.days,
            Self::Manual(q) => q.days,
        }
    }

    /// Metrics/log label for the outcome
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Priced(_) => "priced",
            Self::Manual(_) => "manual",
        }
    }
}

impl Serialize for Quote {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Tagged<'a, T> {
            eligible: bool,
            #[serde(flatten)]
            body: &'a T,
        }

        match self {
            Self::Priced(body) => Tagged {
                eligible: true,
                body,
            }
            .serialize(serializer),
            Self::Manual(body) => Tagged {
                eligible: false,
                body,
            }
            .serialize(serializer),
        }
    }
}
