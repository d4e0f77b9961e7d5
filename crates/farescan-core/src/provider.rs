//! SerpAPI Google Flights client.
//!
//! One validated [`SearchRequest`] maps to exactly one outbound GET with a
//! fixed 30-second timeout: no retries, no backoff, no pagination. The raw
//! payload is kept as a `serde_json::Value` so the `search` subcommand can
//! echo it unmodified; the typed [`FlightsResponse`] view is deserialized
//! from the same value.

use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde_json::Value;

use crate::core_types::{FlightsResponse, SearchRequest};
use crate::errors::FlightsError;

const SERP_API_URL: &str = "https://serpapi.com/search.json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolve the SerpAPI credential from an explicit option or the value of
/// the `SERPAPI_KEY` environment variable, threaded in by the caller. The
/// client itself never reads ambient process state.
pub fn resolve_api_key(
    explicit: Option<String>,
    env_value: Option<String>,
) -> Result<String, FlightsError> {
    explicit.or(env_value).ok_or_else(|| {
        FlightsError::ConfigError(
            "Missing SerpAPI key. Use --api-key or set SERPAPI_KEY.".to_string(),
        )
    })
}

#[async_trait]
pub trait FlightProvider: Send + Sync {
    /// Issue the search and return the provider payload as raw JSON.
    async fn search_json(&self, request: &SearchRequest) -> Result<Value, FlightsError>;

    /// Issue the search and deserialize the typed response view.
    async fn search(&self, request: &SearchRequest) -> Result<FlightsResponse, FlightsError> {
        let value = self.search_json(request).await?;
        serde_json::from_value(value)
            .map_err(|e| FlightsError::ParsingError(format!("Unexpected response shape: {}", e)))
    }
}

#[derive(Debug, Clone)]
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl SerpApiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_base: SERP_API_URL.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// Build the outbound query pairs. Both dates are re-checked against the
    /// canonical format here even though the normalizer already produced
    /// them.
    pub fn build_query(
        &self,
        options: &SearchRequest,
    ) -> Result<Vec<(&'static str, String)>, FlightsError> {
        assert_canonical_date(&options.date, "date")?;
        if let Some(return_date) = &options.return_date {
            assert_canonical_date(return_date, "return-date")?;
        }

        let mut params: Vec<(&'static str, String)> = vec![
            ("engine", "google_flights".to_string()),
            ("api_key", self.api_key.clone()),
            ("departure_id", options.from.clone()),
            ("arrival_id", options.to.clone()),
            ("outbound_date", options.date.clone()),
            // Provider trip type: 1 = round trip, 2 = one way.
            (
                "type",
                if options.return_date.is_some() { "1" } else { "2" }.to_string(),
            ),
            ("travel_class", options.cabin.provider_code().to_string()),
            ("adults", options.adults.to_string()),
            ("children", options.children.to_string()),
            ("infants_in_seat", options.infants_in_seat.to_string()),
            ("infants_on_lap", options.infants_on_lap.to_string()),
            ("currency", options.currency.clone()),
            ("hl", options.hl.clone()),
            ("gl", options.gl.clone()),
            (
                "deep_search",
                if options.deep_search { "true" } else { "false" }.to_string(),
            ),
        ];

        if let Some(return_date) = &options.return_date {
            params.push(("return_date", return_date.clone()));
        }
        if let Some(max_price) = options.max_price {
            params.push(("max_price", max_price.to_string()));
        }
        if let Some(airlines) = &options.include_airlines {
            params.push(("include_airlines", airlines.join(",")));
        }
        if let Some(airlines) = &options.exclude_airlines {
            params.push(("exclude_airlines", airlines.join(",")));
        }
        if let Some(stops) = options.stops {
            params.push(("stops", stops.to_string()));
        }

        Ok(params)
    }
}

fn assert_canonical_date(date: &str, field: &str) -> Result<(), FlightsError> {
    let canonical = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    if canonical.is_match(date) {
        Ok(())
    } else {
        Err(FlightsError::ValidationError(format!(
            "{} must be in YYYY-MM-DD format",
            field
        )))
    }
}

#[async_trait]
impl FlightProvider for SerpApiClient {
    async fn search_json(&self, request: &SearchRequest) -> Result<Value, FlightsError> {
        let params = self.build_query(request)?;

        log::debug!(
            "SerpAPI request: {} {} -> {} on {}",
            self.api_base,
            request.from,
            request.to,
            request.date
        );

        let response = self
            .client
            .get(&self.api_base)
            .query(&params)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        log::debug!("SerpAPI response status: {}", status);

        if !status.is_success() {
            return Err(FlightsError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| FlightsError::ParsingError(format!("Invalid JSON response: {}", e)))?;

        if let Some(message) = data.get("error").and_then(Value::as_str) {
            return Err(FlightsError::ProviderError(message.to_string()));
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Cabin;

    fn request() -> SearchRequest {
        SearchRequest {
            from: "JFK".to_string(),
            to: "LAX".to_string(),
            date: "2025-12-24".to_string(),
            return_date: None,
            adults: 1,
            children: 0,
            infants_in_seat: 0,
            infants_on_lap: 0,
            cabin: Cabin::Economy,
            currency: "USD".to_string(),
            hl: "en".to_string(),
            gl: "us".to_string(),
            max_price: None,
            include_airlines: None,
            exclude_airlines: None,
            stops: None,
            deep_search: false,
        }
    }

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn test_resolve_api_key_precedence() {
        assert_eq!(
            resolve_api_key(Some("explicit".to_string()), Some("env".to_string())).unwrap(),
            "explicit"
        );
        assert_eq!(
            resolve_api_key(None, Some("env".to_string())).unwrap(),
            "env"
        );
        let err = resolve_api_key(None, None).unwrap_err();
        assert!(err.to_string().contains("SERPAPI_KEY"));
    }

    #[test]
    fn test_build_query_one_way_defaults() {
        let client = SerpApiClient::new("secret".to_string());
        let params = client.build_query(&request()).unwrap();

        assert_eq!(param(&params, "engine"), Some("google_flights"));
        assert_eq!(param(&params, "api_key"), Some("secret"));
        assert_eq!(param(&params, "departure_id"), Some("JFK"));
        assert_eq!(param(&params, "arrival_id"), Some("LAX"));
        assert_eq!(param(&params, "outbound_date"), Some("2025-12-24"));
        assert_eq!(param(&params, "type"), Some("2"));
        assert_eq!(param(&params, "travel_class"), Some("1"));
        assert_eq!(param(&params, "deep_search"), Some("false"));
        assert_eq!(param(&params, "return_date"), None);
        assert_eq!(param(&params, "max_price"), None);
        assert_eq!(param(&params, "include_airlines"), None);
        assert_eq!(param(&params, "stops"), None);
    }

    #[test]
    fn test_build_query_round_trip_with_filters() {
        let client = SerpApiClient::new("secret".to_string());
        let mut options = request();
        options.return_date = Some("2026-01-05".to_string());
        options.cabin = Cabin::Business;
        options.max_price = Some(900);
        options.include_airlines = Some(vec!["UA".to_string(), "DL".to_string()]);
        options.exclude_airlines = Some(vec!["NK".to_string()]);
        options.stops = Some(1);
        options.deep_search = true;

        let params = client.build_query(&options).unwrap();
        assert_eq!(param(&params, "type"), Some("1"));
        assert_eq!(param(&params, "return_date"), Some("2026-01-05"));
        assert_eq!(param(&params, "travel_class"), Some("3"));
        assert_eq!(param(&params, "max_price"), Some("900"));
        assert_eq!(param(&params, "include_airlines"), Some("UA,DL"));
        assert_eq!(param(&params, "exclude_airlines"), Some("NK"));
        assert_eq!(param(&params, "stops"), Some("1"));
        assert_eq!(param(&params, "deep_search"), Some("true"));
    }

    #[test]
    fn test_build_query_rechecks_date_format() {
        let client = SerpApiClient::new("secret".to_string());
        let mut options = request();
        options.date = "12/24/2025".to_string();

        let err = client.build_query(&options).unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }
}
