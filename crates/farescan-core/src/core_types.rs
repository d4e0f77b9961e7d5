//! Domain types shared across the flight-search pipeline.
//!
//! [`SearchRequest`] is the canonical, fully-normalized form of one search:
//! dates are always `YYYY-MM-DD`, airline identifiers are uppercase 2-char
//! codes, and enum fields are validated. The provider payload types mirror
//! the SerpAPI Google Flights response shape; every top-level list and
//! metadata field is optional because the provider omits what it has no
//! data for.

use serde::{Deserialize, Serialize};

/// Cabin class as exposed on the CLI and mapped to the provider's
/// numeric travel class codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cabin {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl Cabin {
    pub const CHOICES: &'static str = "economy, premium-economy, business, first";

    pub fn as_str(&self) -> &'static str {
        match self {
            Cabin::Economy => "economy",
            Cabin::PremiumEconomy => "premium-economy",
            Cabin::Business => "business",
            Cabin::First => "first",
        }
    }

    /// The provider encodes travel class as a numeric string.
    pub fn provider_code(&self) -> &'static str {
        match self {
            Cabin::Economy => "1",
            Cabin::PremiumEconomy => "2",
            Cabin::Business => "3",
            Cabin::First => "4",
        }
    }
}

/// Sort key selector for the `list` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Price,
    Duration,
    Stops,
}

impl SortField {
    pub const CHOICES: &'static str = "price, duration, stops";
}

/// Fully-normalized search request, ready for query construction.
///
/// Invariants: `date` and `return_date` are canonical `YYYY-MM-DD`;
/// `from`/`to` are uppercased; airline code lists hold uppercase 2-char
/// codes and are `None` rather than empty when no filter applies.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub from: String,
    pub to: String,
    pub date: String,
    pub return_date: Option<String>,
    pub adults: u32,
    pub children: u32,
    pub infants_in_seat: u32,
    pub infants_on_lap: u32,
    pub cabin: Cabin,
    pub currency: String,
    pub hl: String,
    pub gl: String,
    pub max_price: Option<u64>,
    pub include_airlines: Option<Vec<String>>,
    pub exclude_airlines: Option<Vec<String>>,
    pub stops: Option<u8>,
    pub deep_search: bool,
}

/// One endpoint of a flight leg: airport code, display name, local time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportPoint {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Provider-local time string, preserved verbatim to avoid timezone
    /// shifting in CLI output.
    #[serde(default)]
    pub time: String,
}

/// One flight segment between two airports, carried by one airline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightLeg {
    pub departure_airport: AirportPoint,
    pub arrival_airport: AirportPoint,
    /// Leg duration in minutes.
    pub duration: u32,
    pub airline: String,
    #[serde(default)]
    pub flight_number: Option<String>,
}

/// A complete itinerary: one or more legs plus optional totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightOption {
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub total_duration: Option<u32>,
    pub flights: Vec<FlightLeg>,
    /// Token for fetching the return leg of a round-trip itinerary.
    #[serde(default)]
    pub departure_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchMetadata {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub google_flights_url: Option<String>,
    #[serde(default)]
    pub total_time_taken: Option<f64>,
}

/// Typed view of the provider response. All fields are absent-tolerant;
/// the `error` field is checked (and rejected) by the provider client
/// before this type is ever constructed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightsResponse {
    #[serde(default)]
    pub best_flights: Option<Vec<FlightOption>>,
    #[serde(default)]
    pub other_flights: Option<Vec<FlightOption>>,
    #[serde(default)]
    pub search_metadata: Option<SearchMetadata>,
    #[serde(default)]
    pub error: Option<String>,
}
