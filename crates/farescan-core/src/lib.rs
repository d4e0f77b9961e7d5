//! Core library for the farescan flight-search CLI.
//!
//! This crate provides everything below the argument surface of the `farescan`
//! binary: normalization of loose CLI input into a canonical search request,
//! a thin client for the SerpAPI Google Flights endpoint, and the
//! flattening / filtering / ranking pipeline that turns a provider payload
//! into a bounded display table.
//!
//! Control flow is strictly linear: raw options are normalized into a
//! [`SearchRequest`], the [`provider`] module issues exactly one HTTP GET,
//! and the [`rows`] module projects the response into ranked [`FlightRow`]s.
//! Nothing is cached or retained between invocations.

pub mod core_types;
pub mod errors;
pub mod normalize;
pub mod provider;
pub mod rows;
pub mod table;

pub use core_types::{
    Cabin, FlightLeg, FlightOption, FlightsResponse, SearchMetadata, SearchRequest, SortField,
};
pub use errors::FlightsError;
pub use normalize::{parse_search_options, RawSearchOptions};
pub use provider::{resolve_api_key, FlightProvider, SerpApiClient};
pub use rows::{build_listing, FlightRow, ListOutcome, Ranking, RowFilters};
