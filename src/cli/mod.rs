//! CLI module - Command-line interface for Farefinder
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;
pub mod render;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::services::filter::parse_max_price;

/// Farefinder - Flight offer search
/// Looks up offers from the Amadeus API and filters them locally
#[derive(Parser)]
#[command(name = "farefinder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search flight offers once and print the filtered results
    #[command(alias = "s")]
    Search {
        /// Origin location code (e.g. JFK)
        origin: String,

        /// Destination location code (e.g. LAX)
        destination: String,

        /// Departure date (YYYY-MM-DD)
        date: NaiveDate,

        /// Maximum total price
        #[arg(long, value_parser = parse_max_price)]
        max_price: Option<f64>,

        /// Maximum number of stops
        #[arg(long)]
        max_stops: Option<u32>,

        /// Airline code, or "any"
        #[arg(long)]
        airline: Option<String>,

        /// Draw the price trend of the filtered results
        #[arg(long)]
        chart: bool,

        /// Print the filtered results as JSON
        #[arg(long, conflicts_with = "chart")]
        json: bool,
    },

    /// Interactive search form on stdin
    #[command(alias = "i")]
    Shell,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let base = ["farefinder", "search", "JFK", "LAX", "2026-02-01"];
        Cli::try_parse_from(base.iter().chain(args).copied())
    }

    #[test]
    fn search_accepts_valid_price_bound() {
        let cli = parse(&["--max-price", "500"]).unwrap();
        let Some(Commands::Search { max_price, .. }) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(max_price, Some(500.0));
    }

    #[test]
    fn search_rejects_non_finite_or_negative_price_bound() {
        for bad in ["NaN", "inf", "-1", "abc"] {
            assert!(parse(&["--max-price", bad]).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn search_rejects_malformed_date() {
        let result = Cli::try_parse_from(["farefinder", "search", "JFK", "LAX", "02/01/2026"]);
        assert!(result.is_err());
    }
}
