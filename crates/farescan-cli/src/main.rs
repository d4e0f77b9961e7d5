use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

mod args;
mod commands;

use args::{Cli, Commands, GoogleFlightsCommands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level_filter = cli.log_level.parse().unwrap_or(LevelFilter::Warn);
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .init();

    match &cli.command {
        Commands::GoogleFlights { command } => match command {
            GoogleFlightsCommands::Search(search_args) => commands::run_search(search_args).await,
            GoogleFlightsCommands::List(list_args) => commands::run_list(list_args).await,
        },
    }
}
