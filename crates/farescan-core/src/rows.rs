//! Flattening, filtering, and ranking of provider results.
//!
//! Each of `best_flights` and `other_flights` is flattened independently into
//! [`FlightRow`]s tagged with the group name and a 1-based rank equal to the
//! provider's own ordering. Rank and group never change after construction;
//! sorting only reorders rows. Client-side filters cover what the provider
//! query cannot express, and the ranking is a deterministic multi-key sort
//! with group + rank as the final tie-break.

use std::collections::HashSet;

use regex::Regex;

use crate::core_types::{FlightLeg, FlightOption, FlightsResponse, SearchRequest, SortField};

/// Presentation projection of one [`FlightOption`].
///
/// `carrier_codes` is carried structurally from the legs at construction
/// time, so filtering never re-parses rendered text.
#[derive(Debug, Clone)]
pub struct FlightRow {
    pub group: String,
    pub rank: usize,
    pub price: Option<u64>,
    pub duration_minutes: u32,
    pub stops: usize,
    pub depart: String,
    pub arrive: String,
    pub route: String,
    pub airlines: String,
    pub segments: String,
    pub carrier_codes: Vec<String>,
    pub departure_token: Option<String>,
}

impl FlightRow {
    /// Sort key that places priceless rows after every priced row.
    pub fn price_sort(&self) -> u64 {
        self.price.unwrap_or(u64::MAX)
    }

    pub fn price_display(&self) -> String {
        match self.price {
            Some(price) => price.to_string(),
            None => "N/A".to_string(),
        }
    }

    pub fn duration_display(&self) -> String {
        minutes_to_hm(self.duration_minutes)
    }
}

pub fn minutes_to_hm(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

fn serialize_segment(leg: &FlightLeg) -> String {
    match &leg.flight_number {
        Some(number) => format!(
            "{} {} {}->{}",
            leg.airline, number, leg.departure_airport.id, leg.arrival_airport.id
        ),
        None => format!(
            "{} {}->{}",
            leg.airline, leg.departure_airport.id, leg.arrival_airport.id
        ),
    }
}

/// Extract the 2-char carrier designator from a flight number such as
/// "UA 1606".
fn carrier_code(flight_number: &str) -> Option<String> {
    let designator = Regex::new(r"\b([A-Za-z0-9]{2})\s+\d{1,4}\b").unwrap();
    designator
        .captures(flight_number)
        .map(|caps| caps[1].to_ascii_uppercase())
}

fn carrier_codes(legs: &[FlightLeg]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut codes = Vec::new();
    for leg in legs {
        if let Some(code) = leg.flight_number.as_deref().and_then(carrier_code) {
            if seen.insert(code.clone()) {
                codes.push(code);
            }
        }
    }
    codes
}

fn to_row(option: &FlightOption, group: &str, rank: usize) -> Option<FlightRow> {
    let legs = &option.flights;
    let first = legs.first()?;
    let last = legs.last()?;

    let duration_minutes = option
        .total_duration
        .unwrap_or_else(|| legs.iter().map(|leg| leg.duration).sum());

    let mut seen = HashSet::new();
    let airlines = legs
        .iter()
        .filter(|leg| seen.insert(leg.airline.clone()))
        .map(|leg| leg.airline.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let segments = legs
        .iter()
        .map(serialize_segment)
        .collect::<Vec<_>>()
        .join(" | ");

    Some(FlightRow {
        group: group.to_string(),
        rank,
        price: option.price,
        duration_minutes,
        stops: legs.len().saturating_sub(1),
        depart: first.departure_airport.time.clone(),
        arrive: last.arrival_airport.time.clone(),
        route: format!("{} -> {}", first.departure_airport.id, last.arrival_airport.id),
        airlines,
        segments,
        carrier_codes: carrier_codes(legs),
        departure_token: option.departure_token.clone(),
    })
}

/// Flatten one provider result list into rows tagged with `group`. Rank is
/// the 1-based position in the provider's list and is never recomputed.
pub fn collect_rows(options: Option<&[FlightOption]>, group: &str) -> Vec<FlightRow> {
    options
        .map(|list| {
            list.iter()
                .enumerate()
                .filter_map(|(index, option)| to_row(option, group, index + 1))
                .collect()
        })
        .unwrap_or_default()
}

/// Client-side filters the provider query cannot express directly. Each
/// filter is skipped entirely when its option is absent.
#[derive(Debug, Clone, Default)]
pub struct RowFilters {
    pub stops: Option<u8>,
    pub include_airlines: Option<Vec<String>>,
    pub exclude_airlines: Option<Vec<String>>,
    pub nonstop_only: bool,
}

impl RowFilters {
    pub fn from_request(request: &SearchRequest, nonstop_only: bool) -> Self {
        Self {
            stops: request.stops,
            include_airlines: request.include_airlines.clone(),
            exclude_airlines: request.exclude_airlines.clone(),
            nonstop_only,
        }
    }
}

pub fn apply_filters(mut rows: Vec<FlightRow>, filters: &RowFilters) -> Vec<FlightRow> {
    if let Some(stops) = filters.stops {
        rows.retain(|row| row.stops == stops as usize);
    }

    if let Some(include) = &filters.include_airlines {
        let include: HashSet<&str> = include.iter().map(String::as_str).collect();
        // Rows with no detected carrier are excluded rather than given the
        // benefit of the doubt.
        rows.retain(|row| {
            !row.carrier_codes.is_empty()
                && row
                    .carrier_codes
                    .iter()
                    .all(|code| include.contains(code.as_str()))
        });
    }

    if let Some(exclude) = &filters.exclude_airlines {
        let exclude: HashSet<&str> = exclude.iter().map(String::as_str).collect();
        rows.retain(|row| {
            row.carrier_codes
                .iter()
                .all(|code| !exclude.contains(code.as_str()))
        });
    }

    if filters.nonstop_only {
        rows.retain(|row| row.stops == 0);
    }

    rows
}

/// Ranking options for the multi-key sort.
#[derive(Debug, Clone)]
pub struct Ranking {
    pub sort_by: SortField,
    pub prefer_airline: Option<String>,
    pub prefer_nonstop: bool,
}

fn preference_matches(row: &FlightRow, needle: &str) -> bool {
    let haystack = format!("{} {}", row.airlines, row.segments).to_lowercase();
    haystack.contains(needle)
}

/// Sort rows in place: preferred-airline matches first, then (optionally)
/// fewer stops, then the selected sort field ascending, with group name and
/// in-group rank as tie-breaks. Total ordering: group + rank is unique.
pub fn rank_rows(rows: &mut [FlightRow], ranking: &Ranking) {
    let needle = ranking
        .prefer_airline
        .as_deref()
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty());

    rows.sort_by(|a, b| {
        if let Some(needle) = &needle {
            let a_match = preference_matches(a, needle);
            let b_match = preference_matches(b, needle);
            if a_match != b_match {
                return if a_match {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Greater
                };
            }
        }

        if ranking.prefer_nonstop {
            let by_stops = a.stops.cmp(&b.stops);
            if by_stops != std::cmp::Ordering::Equal {
                return by_stops;
            }
        }

        let primary = match ranking.sort_by {
            SortField::Price => a.price_sort().cmp(&b.price_sort()),
            SortField::Duration => a.duration_minutes.cmp(&b.duration_minutes),
            SortField::Stops => a.stops.cmp(&b.stops),
        };

        primary
            .then_with(|| a.group.cmp(&b.group))
            .then_with(|| a.rank.cmp(&b.rank))
    });
}

/// Outcome of the list pipeline. "No results at all" is reported distinctly
/// from "results filtered to empty".
#[derive(Debug)]
pub enum ListOutcome {
    NoFlights,
    NoMatches,
    Listing { rows: Vec<FlightRow>, total: usize },
}

/// Run the full presenter pipeline: flatten, filter, rank, truncate.
pub fn build_listing(
    response: &FlightsResponse,
    filters: &RowFilters,
    ranking: &Ranking,
    limit: usize,
) -> ListOutcome {
    let mut rows = collect_rows(response.best_flights.as_deref(), "best");
    rows.extend(collect_rows(response.other_flights.as_deref(), "other"));

    if rows.is_empty() {
        return ListOutcome::NoFlights;
    }

    let mut filtered = apply_filters(rows, filters);
    if filtered.is_empty() {
        return ListOutcome::NoMatches;
    }

    let total = filtered.len();
    rank_rows(&mut filtered, ranking);
    filtered.truncate(limit);

    ListOutcome::Listing {
        rows: filtered,
        total,
    }
}
