//! Error types for the flight-search pipeline.
//!
//! A single taxonomy covers every failure mode of one invocation: input
//! validation (detected before any network activity), missing configuration,
//! transport failures, non-success HTTP statuses, and provider-reported
//! errors. Empty-result conditions are deliberately not represented here;
//! they are informational outcomes, not errors.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum FlightsError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("SerpAPI request failed ({status} {reason})")]
    HttpStatus { status: u16, reason: String },
    #[error("SerpAPI error: {0}")]
    ProviderError(String),
    #[error("HTTP transport error: {0}")]
    TransportError(String),
    #[error("Parsing error: {0}")]
    ParsingError(String),
}

impl From<reqwest::Error> for FlightsError {
    fn from(err: reqwest::Error) -> Self {
        FlightsError::TransportError(err.to_string())
    }
}
