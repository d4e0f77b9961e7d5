//! Command execution: normalize options, issue the single provider request,
//! and present the outcome.
//!
//! Empty-result outcomes print an informational line and return normally;
//! every error propagates to `main` for a non-zero exit.

use anyhow::Result;
use farescan_core::normalize::{parse_non_negative_int, parse_sort_field};
use farescan_core::table::render_table;
use farescan_core::{
    build_listing, parse_search_options, resolve_api_key, FlightProvider, FlightsError,
    ListOutcome, Ranking, RowFilters, SerpApiClient,
};

use crate::args::{ListArgs, SearchArgs};

fn build_client(args: &SearchArgs) -> Result<SerpApiClient, FlightsError> {
    let api_key = resolve_api_key(args.api_key.clone(), std::env::var("SERPAPI_KEY").ok())?;
    Ok(SerpApiClient::new(api_key))
}

pub async fn run_search(args: &SearchArgs) -> Result<()> {
    let request = parse_search_options(&args.to_raw())?;
    let client = build_client(args)?;

    let data = client.search_json(&request).await?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

pub async fn run_list(args: &ListArgs) -> Result<()> {
    let request = parse_search_options(&args.search.to_raw())?;
    let sort_by = parse_sort_field(&args.sort_by)?;
    let limit = parse_non_negative_int(&args.limit, "limit")?;
    let limit = if limit == 0 { 10 } else { limit as usize };

    let client = build_client(&args.search)?;
    let response = client.search(&request).await?;

    let filters = RowFilters::from_request(&request, args.nonstop_only);
    let ranking = Ranking {
        sort_by,
        prefer_airline: args.prefer_airline.clone(),
        prefer_nonstop: args.prefer_nonstop,
    };

    match build_listing(&response, &filters, &ranking, limit) {
        ListOutcome::NoFlights => {
            println!("No flights found.");
        }
        ListOutcome::NoMatches => {
            println!("No flights matched the selected filters in this single response.");
        }
        ListOutcome::Listing { rows, total } => {
            if let Some(metadata) = &response.search_metadata {
                if let Some(id) = &metadata.id {
                    println!("search_id: {}", id);
                }
                if let Some(url) = &metadata.google_flights_url {
                    println!("google_flights_url: {}", url);
                }
            }
            println!("results_shown: {}/{}", rows.len(), total);
            println!("{}", render_table(&rows, args.show_token));

            if request.return_date.is_some() {
                println!("note: round-trip first response mostly lists outbound options; use departure_token for return-leg follow-up queries.");
            }
        }
    }

    Ok(())
}
