//! Argument surface for the `farescan` binary.
//!
//! Options are collected as raw strings and normalized through
//! `farescan_core::normalize`, so every validation failure is raised with a
//! field-specific message before any network activity.

use clap::{Args, Parser, Subcommand};
use farescan_core::RawSearchOptions;

#[derive(Parser, Debug)]
#[clap(name = "farescan", version = "0.1.0", about = "Multi-provider flights CLI")]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    #[clap(long, default_value = "warn", help = "Log level for diagnostic output")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Google Flights tools (via SerpAPI)
    GoogleFlights {
        #[clap(subcommand)]
        command: GoogleFlightsCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum GoogleFlightsCommands {
    /// Search Google Flights and print raw JSON (single SerpAPI request)
    Search(SearchArgs),
    /// Search and list flight options in a ranked table (single SerpAPI request)
    List(ListArgs),
}

/// Options shared by both subcommands, kept string-typed until normalized.
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[clap(long, help = "departure airport code, e.g. JFK")]
    pub from: String,

    #[clap(long, help = "arrival airport code, e.g. LAX")]
    pub to: String,

    #[clap(long, help = "outbound date: YYYY-MM-DD or M/D[/YYYY]")]
    pub date: String,

    #[clap(long, help = "return date: YYYY-MM-DD or M/D[/YYYY]")]
    pub return_date: Option<String>,

    #[clap(long, default_value = "1", help = "number of adults")]
    pub adults: String,

    #[clap(long, default_value = "0", help = "number of children")]
    pub children: String,

    #[clap(long, default_value = "0", help = "number of infants in seat")]
    pub infants_in_seat: String,

    #[clap(long, default_value = "0", help = "number of infants on lap")]
    pub infants_on_lap: String,

    #[clap(long, default_value = "economy", help = "economy|premium-economy|business|first")]
    pub cabin: String,

    #[clap(long, default_value = "USD", help = "currency code")]
    pub currency: String,

    #[clap(long, default_value = "en", help = "language")]
    pub hl: String,

    #[clap(long, default_value = "us", help = "country")]
    pub gl: String,

    #[clap(long, help = "maximum total price")]
    pub max_price: Option<String>,

    #[clap(long, help = "include airlines (csv), e.g. UA or united,delta")]
    pub airlines: Option<String>,

    #[clap(long, help = "exclude airlines (csv)")]
    pub exclude_airlines: Option<String>,

    #[clap(long, help = "0|1|2|3 stops")]
    pub stops: Option<String>,

    #[clap(long, help = "enable deep search")]
    pub deep_search: bool,

    #[clap(long, help = "SerpAPI key (or set SERPAPI_KEY)")]
    pub api_key: Option<String>,
}

impl SearchArgs {
    pub fn to_raw(&self) -> RawSearchOptions {
        RawSearchOptions {
            from: self.from.clone(),
            to: self.to.clone(),
            date: self.date.clone(),
            return_date: self.return_date.clone(),
            adults: self.adults.clone(),
            children: self.children.clone(),
            infants_in_seat: self.infants_in_seat.clone(),
            infants_on_lap: self.infants_on_lap.clone(),
            cabin: self.cabin.clone(),
            currency: self.currency.clone(),
            hl: self.hl.clone(),
            gl: self.gl.clone(),
            max_price: self.max_price.clone(),
            airlines: self.airlines.clone(),
            exclude_airlines: self.exclude_airlines.clone(),
            stops: self.stops.clone(),
            deep_search: self.deep_search,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[clap(flatten)]
    pub search: SearchArgs,

    #[clap(long, default_value = "10", help = "maximum rows to print")]
    pub limit: String,

    #[clap(long, default_value = "price", help = "price|duration|stops")]
    pub sort_by: String,

    #[clap(long, help = "rank matching airline options first")]
    pub prefer_airline: Option<String>,

    #[clap(long, help = "rank fewer-stop options first before sort-by")]
    pub prefer_nonstop: bool,

    #[clap(long, help = "only include nonstop options")]
    pub nonstop_only: bool,

    #[clap(long, help = "print departure_token column if present")]
    pub show_token: bool,
}
