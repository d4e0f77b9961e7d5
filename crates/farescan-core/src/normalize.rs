//! Input normalization: raw string-typed CLI fields into a canonical
//! [`SearchRequest`].
//!
//! Every validation failure here is raised before any network activity, with
//! a field-specific message. Dates leave this module in canonical
//! `YYYY-MM-DD` form; airline identifiers leave it as uppercase 2-char IATA
//! codes.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;

use crate::core_types::{Cabin, SearchRequest, SortField};
use crate::errors::FlightsError;

/// Raw string-typed search options as collected from the CLI, prior to any
/// validation.
#[derive(Debug, Clone)]
pub struct RawSearchOptions {
    pub from: String,
    pub to: String,
    pub date: String,
    pub return_date: Option<String>,
    pub adults: String,
    pub children: String,
    pub infants_in_seat: String,
    pub infants_on_lap: String,
    pub cabin: String,
    pub currency: String,
    pub hl: String,
    pub gl: String,
    pub max_price: Option<String>,
    pub airlines: Option<String>,
    pub exclude_airlines: Option<String>,
    pub stops: Option<String>,
    pub deep_search: bool,
}

fn validation(message: String) -> FlightsError {
    FlightsError::ValidationError(message)
}

/// Parse flexible date input (`YYYY-MM-DD` or `M/D[/YYYY]`) into canonical
/// `YYYY-MM-DD`, using the current UTC day for the year-rolling rule.
pub fn parse_date(value: &str, field: &str) -> Result<String, FlightsError> {
    parse_date_with_today(value, field, Utc::now().date_naive())
}

/// Like [`parse_date`] but with an explicit "today", so the year-rolling
/// behavior is deterministic under test.
///
/// For the lenient `M/D[/YYYY]` form: 2-digit years are assumed to be in the
/// 2000s, and a missing year defaults to the current year unless the date has
/// already passed (day granularity), in which case it rolls to the next year.
pub fn parse_date_with_today(
    value: &str,
    field: &str,
    today: NaiveDate,
) -> Result<String, FlightsError> {
    let trimmed = value.trim();

    let iso = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    if iso.is_match(trimmed) {
        return match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(_) => Ok(trimmed.to_string()),
            Err(_) => Err(validation(format!("{}: invalid date", field))),
        };
    }

    let lenient = Regex::new(r"^(\d{1,2})/(\d{1,2})(?:/(\d{2,4}))?$").unwrap();
    let caps = lenient.captures(trimmed).ok_or_else(|| {
        validation(format!("{} must be YYYY-MM-DD or M/D[/YYYY]", field))
    })?;

    let month: u32 = caps[1].parse().unwrap_or(0);
    let day: u32 = caps[2].parse().unwrap_or(0);
    let year_from_input: Option<i32> = caps.get(3).map(|m| m.as_str().parse().unwrap_or(0));

    if !(1..=12).contains(&month) {
        return Err(validation(format!("{}: invalid month", field)));
    }
    if !(1..=31).contains(&day) {
        return Err(validation(format!("{}: invalid day", field)));
    }

    let year = match year_from_input {
        Some(y) if y < 100 => y + 2000,
        Some(y) => y,
        None => today.year(),
    };

    let mut candidate = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| validation(format!("{}: invalid date", field)))?;

    // Year omitted and the date already passed this year: assume next year.
    if year_from_input.is_none() && candidate < today {
        candidate = NaiveDate::from_ymd_opt(year + 1, month, day)
            .ok_or_else(|| validation(format!("{}: invalid date", field)))?;
    }

    Ok(candidate.format("%Y-%m-%d").to_string())
}

pub fn parse_non_negative_int(value: &str, name: &str) -> Result<u64, FlightsError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| validation(format!("{} must be a non-negative integer", name)))
}

fn parse_count(value: &str, name: &str) -> Result<u32, FlightsError> {
    let parsed = parse_non_negative_int(value, name)?;
    u32::try_from(parsed)
        .map_err(|_| validation(format!("{} must be a non-negative integer", name)))
}

pub fn parse_cabin(value: &str) -> Result<Cabin, FlightsError> {
    match value {
        "economy" => Ok(Cabin::Economy),
        "premium-economy" => Ok(Cabin::PremiumEconomy),
        "business" => Ok(Cabin::Business),
        "first" => Ok(Cabin::First),
        _ => Err(validation(format!(
            "cabin must be one of: {}",
            Cabin::CHOICES
        ))),
    }
}

pub fn parse_sort_field(value: &str) -> Result<SortField, FlightsError> {
    match value {
        "price" => Ok(SortField::Price),
        "duration" => Ok(SortField::Duration),
        "stops" => Ok(SortField::Stops),
        _ => Err(validation(format!(
            "sort-by must be one of: {}",
            SortField::CHOICES
        ))),
    }
}

pub fn parse_stops(value: &str) -> Result<u8, FlightsError> {
    match value.trim().parse::<u8>() {
        Ok(parsed) if parsed <= 3 => Ok(parsed),
        _ => Err(validation("stops must be one of: 0, 1, 2, 3".to_string())),
    }
}

/// Carrier display names the CLI accepts in place of 2-letter codes.
fn airline_code_for_name(name: &str) -> Option<&'static str> {
    match name {
        "united" => Some("UA"),
        "delta" => Some("DL"),
        "american" => Some("AA"),
        "southwest" => Some("WN"),
        "alaska" => Some("AS"),
        "jetblue" => Some("B6"),
        "frontier" => Some("F9"),
        "spirit" => Some("NK"),
        "hawaiian" => Some("HA"),
        _ => None,
    }
}

/// Normalize one airline token: a 2-char alphanumeric token is treated as an
/// IATA code and uppercased, anything else is resolved through the static
/// name table.
pub fn normalize_airline_code(input: &str) -> Result<String, FlightsError> {
    let token = input.trim();
    if token.is_empty() {
        return Err(validation("airline value cannot be empty".to_string()));
    }

    if token.len() == 2 && token.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Ok(token.to_ascii_uppercase());
    }

    airline_code_for_name(&token.to_ascii_lowercase())
        .map(str::to_string)
        .ok_or_else(|| {
            validation(format!(
                "Unknown airline '{}'. Use 2-letter code (e.g. UA) or common name.",
                token
            ))
        })
}

/// Parse a comma-separated airline list into deduplicated codes. An absent or
/// empty input means "no filter" (`None`), never an empty list.
pub fn parse_airline_list(value: Option<&str>) -> Result<Option<Vec<String>>, FlightsError> {
    let Some(value) = value else {
        return Ok(None);
    };
    if value.trim().is_empty() {
        return Ok(None);
    }

    let mut seen = HashSet::new();
    let mut codes = Vec::new();
    for item in value.split(',') {
        let code = normalize_airline_code(item)?;
        if seen.insert(code.clone()) {
            codes.push(code);
        }
    }

    Ok(if codes.is_empty() { None } else { Some(codes) })
}

/// Parse the shared raw CLI options into the normalized provider request.
pub fn parse_search_options(raw: &RawSearchOptions) -> Result<SearchRequest, FlightsError> {
    Ok(SearchRequest {
        from: raw.from.to_ascii_uppercase(),
        to: raw.to.to_ascii_uppercase(),
        date: parse_date(&raw.date, "date")?,
        return_date: raw
            .return_date
            .as_deref()
            .map(|value| parse_date(value, "return-date"))
            .transpose()?,
        adults: parse_count(&raw.adults, "adults")?,
        children: parse_count(&raw.children, "children")?,
        infants_in_seat: parse_count(&raw.infants_in_seat, "infants-in-seat")?,
        infants_on_lap: parse_count(&raw.infants_on_lap, "infants-on-lap")?,
        cabin: parse_cabin(&raw.cabin)?,
        currency: raw.currency.clone(),
        hl: raw.hl.clone(),
        gl: raw.gl.clone(),
        max_price: raw
            .max_price
            .as_deref()
            .map(|value| parse_non_negative_int(value, "max-price"))
            .transpose()?,
        include_airlines: parse_airline_list(raw.airlines.as_deref())?,
        exclude_airlines: parse_airline_list(raw.exclude_airlines.as_deref())?,
        stops: raw
            .stops
            .as_deref()
            .map(parse_stops)
            .transpose()?,
        deep_search: raw.deep_search,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_strict_date_passes_through() {
        assert_eq!(
            parse_date_with_today("2025-12-24", "date", today()).unwrap(),
            "2025-12-24"
        );
    }

    #[test]
    fn test_strict_date_rejects_nonexistent_day() {
        assert!(parse_date_with_today("2025-02-30", "date", today()).is_err());
    }

    #[test]
    fn test_lenient_date_with_full_year() {
        assert_eq!(
            parse_date_with_today("3/7/2026", "date", today()).unwrap(),
            "2026-03-07"
        );
    }

    #[test]
    fn test_lenient_date_two_digit_year_is_2000s() {
        assert_eq!(
            parse_date_with_today("3/7/26", "date", today()).unwrap(),
            "2026-03-07"
        );
    }

    #[test]
    fn test_missing_year_rolls_forward_when_passed() {
        // Today is 2025-06-01, so 1/15 already passed this year.
        assert_eq!(
            parse_date_with_today("1/15", "date", today()).unwrap(),
            "2026-01-15"
        );
    }

    #[test]
    fn test_missing_year_keeps_current_year_when_upcoming() {
        assert_eq!(
            parse_date_with_today("12/15", "date", today()).unwrap(),
            "2025-12-15"
        );
    }

    #[test]
    fn test_missing_year_today_is_not_rolled() {
        assert_eq!(
            parse_date_with_today("6/1", "date", today()).unwrap(),
            "2025-06-01"
        );
    }

    #[test]
    fn test_lenient_date_invalid_month_and_day() {
        let err = parse_date_with_today("13/1", "date", today()).unwrap_err();
        assert!(err.to_string().contains("invalid month"));

        let err = parse_date_with_today("1/32", "date", today()).unwrap_err();
        assert!(err.to_string().contains("invalid day"));
    }

    #[test]
    fn test_lenient_date_nonexistent_never_clamps() {
        let err = parse_date_with_today("2/30/2025", "date", today()).unwrap_err();
        assert!(err.to_string().contains("invalid date"));
    }

    #[test]
    fn test_garbage_date_names_expected_formats() {
        let err = parse_date_with_today("next tuesday", "date", today()).unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD or M/D[/YYYY]"));
    }

    #[test]
    fn test_non_negative_int() {
        assert_eq!(parse_non_negative_int("2", "adults").unwrap(), 2);
        assert!(parse_non_negative_int("-1", "adults").is_err());
        assert!(parse_non_negative_int("1.5", "adults").is_err());
        assert!(parse_non_negative_int("two", "adults").is_err());
    }

    #[test]
    fn test_cabin_choices() {
        assert_eq!(parse_cabin("premium-economy").unwrap(), Cabin::PremiumEconomy);
        let err = parse_cabin("coach").unwrap_err();
        assert!(err.to_string().contains("economy, premium-economy, business, first"));
    }

    #[test]
    fn test_sort_field_choices() {
        assert_eq!(parse_sort_field("duration").unwrap(), SortField::Duration);
        assert!(parse_sort_field("rank").is_err());
    }

    #[test]
    fn test_stops_range() {
        assert_eq!(parse_stops("0").unwrap(), 0);
        assert_eq!(parse_stops("3").unwrap(), 3);
        assert!(parse_stops("4").is_err());
        assert!(parse_stops("-1").is_err());
        assert!(parse_stops("one").is_err());
    }

    #[test]
    fn test_airline_code_idempotent_and_case_insensitive() {
        assert_eq!(normalize_airline_code("UA").unwrap(), "UA");
        assert_eq!(normalize_airline_code("ua").unwrap(), "UA");
        assert_eq!(normalize_airline_code("united").unwrap(), "UA");
        assert_eq!(normalize_airline_code("United").unwrap(), "UA");
    }

    #[test]
    fn test_airline_unknown_token_fails() {
        let err = normalize_airline_code("zz-airline").unwrap_err();
        assert!(err.to_string().contains("zz-airline"));
    }

    #[test]
    fn test_airline_empty_token_fails() {
        assert!(normalize_airline_code("  ").is_err());
    }

    #[test]
    fn test_airline_list_dedup_and_absence() {
        assert_eq!(parse_airline_list(None).unwrap(), None);
        assert_eq!(parse_airline_list(Some("")).unwrap(), None);
        assert_eq!(
            parse_airline_list(Some("united,UA,delta")).unwrap(),
            Some(vec!["UA".to_string(), "DL".to_string()])
        );
    }

    fn raw() -> RawSearchOptions {
        RawSearchOptions {
            from: "jfk".to_string(),
            to: "lax".to_string(),
            date: "2025-12-24".to_string(),
            return_date: None,
            adults: "1".to_string(),
            children: "0".to_string(),
            infants_in_seat: "0".to_string(),
            infants_on_lap: "0".to_string(),
            cabin: "economy".to_string(),
            currency: "USD".to_string(),
            hl: "en".to_string(),
            gl: "us".to_string(),
            max_price: None,
            airlines: None,
            exclude_airlines: None,
            stops: None,
            deep_search: false,
        }
    }

    #[test]
    fn test_parse_search_options_normalizes_airports() {
        let request = parse_search_options(&raw()).unwrap();
        assert_eq!(request.from, "JFK");
        assert_eq!(request.to, "LAX");
        assert_eq!(request.date, "2025-12-24");
        assert_eq!(request.return_date, None);
        assert_eq!(request.include_airlines, None);
    }

    #[test]
    fn test_parse_search_options_rejects_bad_count() {
        let mut options = raw();
        options.children = "-2".to_string();
        let err = parse_search_options(&options).unwrap_err();
        assert!(err.to_string().contains("children"));
    }
}
