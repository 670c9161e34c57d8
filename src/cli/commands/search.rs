use std::sync::Arc;

use chrono::NaiveDate;

use crate::cli::render::{render_chart, render_flights};
use crate::clients::AmadeusClient;
use crate::config::Config;
use crate::models::SearchCriteria;
use crate::services::filter::{AirlineFilter, FilterCriteria};
use crate::state::SearchState;

pub struct SearchArgs {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub max_price: Option<f64>,
    pub max_stops: Option<u32>,
    pub airline: Option<String>,
    pub chart: bool,
    pub json: bool,
}

impl SearchArgs {
    /// Command-line bounds override the configured defaults field by field.
    fn filters(&self, defaults: &FilterCriteria) -> FilterCriteria {
        FilterCriteria {
            max_price: self.max_price.unwrap_or(defaults.max_price),
            max_stops: self.max_stops.unwrap_or(defaults.max_stops),
            airline: self
                .airline
                .as_deref()
                .map_or_else(|| defaults.airline.clone(), AirlineFilter::from),
        }
    }
}

pub async fn cmd_search_flights(config: &Config, args: SearchArgs) -> anyhow::Result<()> {
    let client = AmadeusClient::new(config.amadeus.clone());
    let criteria = SearchCriteria::new(&args.origin, &args.destination, args.date);

    let mut state =
        SearchState::new(Arc::new(client), args.filters(&config.filters)).with_criteria(criteria);

    if !args.json {
        let c = state.criteria();
        println!(
            "Searching flights: {} → {} on {}",
            c.origin, c.destination, c.departure_date
        );
    }

    if state.search().await.is_err() {
        let alert = state.take_alert().unwrap_or_default();
        anyhow::bail!(alert);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(state.view())?);
        return Ok(());
    }

    println!();
    print!("{}", render_flights(state.view(), state.records().len()));

    if args.chart && !state.view().is_empty() {
        println!();
        print!("{}", render_chart(&state.view().trend));
    }

    Ok(())
}
