//! Interactive search form.
//!
//! Search inputs only take effect on `search`; filter inputs re-render the
//! current results immediately without touching the network.

use std::io::Write as _;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::render::{render_chart, render_flights};
use crate::clients::AmadeusClient;
use crate::config::Config;
use crate::format::format_price;
use crate::services::filter::{AirlineFilter, parse_max_price};
use crate::state::SearchState;

const HELP: &str = "\
Commands:
  origin <CODE>        set origin (e.g. JFK)
  destination <CODE>   set destination (e.g. LAX)
  date <YYYY-MM-DD>    set departure date
  search               run the search
  max-price <N>        filter by maximum price
  max-stops <N>        filter by maximum stops
  airline <CODE|any>   filter by airline
  airlines             list airlines in the current results
  show                 print the form and filtered results
  chart                draw the price trend
  help                 show this help
  quit                 leave";

#[derive(Debug, Clone, PartialEq)]
enum ShellCommand {
    Origin(String),
    Destination(String),
    Date(NaiveDate),
    Search,
    MaxPrice(f64),
    MaxStops(u32),
    Airline(AirlineFilter),
    Airlines,
    Show,
    Chart,
    Help,
    Quit,
    Empty,
}

fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(name) = parts.next() else {
        return Ok(ShellCommand::Empty);
    };
    let arg = parts.next();
    let extra = parts.next().is_some();

    let required = |what: &str| {
        arg.filter(|_| !extra)
            .ok_or_else(|| format!("Usage: {name} <{what}>"))
    };

    let command = match name.to_lowercase().as_str() {
        "origin" | "from" => ShellCommand::Origin(required("CODE")?.to_string()),
        "destination" | "to" => ShellCommand::Destination(required("CODE")?.to_string()),
        "date" => {
            let value = required("YYYY-MM-DD")?;
            let date = value
                .parse::<NaiveDate>()
                .map_err(|_| format!("Invalid date: {value}"))?;
            ShellCommand::Date(date)
        }
        "search" | "s" => ShellCommand::Search,
        "max-price" | "price" => ShellCommand::MaxPrice(parse_max_price(required("N")?)?),
        "max-stops" | "stops" => {
            let value = required("N")?;
            let stops = value
                .parse::<u32>()
                .map_err(|_| format!("Invalid stop count: {value}"))?;
            ShellCommand::MaxStops(stops)
        }
        "airline" => ShellCommand::Airline(AirlineFilter::from(required("CODE|any")?)),
        "airlines" => ShellCommand::Airlines,
        "show" | "ls" => ShellCommand::Show,
        "chart" => ShellCommand::Chart,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("Unknown command: {other} (try 'help')")),
    };

    Ok(command)
}

fn print_form(state: &SearchState) {
    let c = state.criteria();
    let f = state.filters();
    println!(
        "Search:  {} → {} on {}",
        c.origin, c.destination, c.departure_date
    );
    println!(
        "Filters: max price {} | max stops {} | airline {}",
        format_price(f.max_price),
        f.max_stops,
        f.airline
    );
}

fn print_results(state: &SearchState) {
    print!("{}", render_flights(state.view(), state.records().len()));
}

pub async fn cmd_shell(config: &Config) -> anyhow::Result<()> {
    let client = AmadeusClient::new(config.amadeus.clone());
    let mut state = SearchState::new(Arc::new(client), config.filters.clone());

    println!("Farefinder interactive search. Type 'help' for commands.");
    print_form(&state);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            ShellCommand::Empty => {}
            ShellCommand::Origin(code) => state.set_origin(&code),
            ShellCommand::Destination(code) => state.set_destination(&code),
            ShellCommand::Date(date) => state.set_departure_date(date),
            ShellCommand::Search => {
                println!("Searching...");
                if state.search().await.is_err() {
                    if let Some(alert) = state.take_alert() {
                        println!("⚠ {alert}");
                    }
                }
                print_results(&state);
            }
            ShellCommand::MaxPrice(price) => {
                state.set_max_price(price);
                print_results(&state);
            }
            ShellCommand::MaxStops(stops) => {
                state.set_max_stops(stops);
                print_results(&state);
            }
            ShellCommand::Airline(airline) => {
                state.set_airline(airline);
                print_results(&state);
            }
            ShellCommand::Airlines => {
                let options = state.airline_options();
                if options.is_empty() {
                    println!("No results yet.");
                } else {
                    println!("any, {}", options.join(", "));
                }
            }
            ShellCommand::Show => {
                print_form(&state);
                println!();
                print_results(&state);
            }
            ShellCommand::Chart => {
                let chart = render_chart(&state.view().trend);
                if chart.is_empty() {
                    println!("Nothing to chart.");
                } else {
                    print!("{chart}");
                }
            }
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_form_inputs() {
        assert_eq!(
            parse_command("origin jfk"),
            Ok(ShellCommand::Origin("jfk".to_string()))
        );
        assert_eq!(
            parse_command("  to LAX  "),
            Ok(ShellCommand::Destination("LAX".to_string()))
        );
        assert_eq!(
            parse_command("date 2026-02-01"),
            Ok(ShellCommand::Date(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()))
        );
        assert_eq!(parse_command("SEARCH"), Ok(ShellCommand::Search));
        assert_eq!(parse_command(""), Ok(ShellCommand::Empty));
    }

    #[test]
    fn parses_filters() {
        assert_eq!(parse_command("max-price 500"), Ok(ShellCommand::MaxPrice(500.0)));
        assert_eq!(parse_command("stops 1"), Ok(ShellCommand::MaxStops(1)));
        assert_eq!(
            parse_command("airline any"),
            Ok(ShellCommand::Airline(AirlineFilter::Any))
        );
        assert_eq!(
            parse_command("airline ba"),
            Ok(ShellCommand::Airline(AirlineFilter::Code("BA".to_string())))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("origin").is_err());
        assert!(parse_command("date tomorrow").is_err());
        assert!(parse_command("max-price -5").is_err());
        assert!(parse_command("max-stops two").is_err());
        assert!(parse_command("fly").is_err());
        assert!(parse_command("max-price NaN").is_err());
    }

    #[test]
    fn rejects_extra_words() {
        assert_eq!(
            parse_command("origin new york"),
            Err("Usage: origin <CODE>".to_string())
        );
        assert!(parse_command("date 2026-02-01 10:00").is_err());
        assert!(parse_command("airline BA DL").is_err());
    }
}
