//! Plain-text rendering of results for the terminal.

use std::fmt::Write;

use crate::format::{format_date_time, format_price};
use crate::services::filter::{FlightView, TrendPoint};

const BAR_WIDTH: usize = 40;

#[must_use]
pub fn render_flights(view: &FlightView, total: usize) -> String {
    let mut out = String::new();

    if view.is_empty() {
        if total == 0 {
            out.push_str("No flights found.\n");
        } else {
            let _ = writeln!(out, "No flights match the current filters ({total} hidden).");
        }
        return out;
    }

    let _ = writeln!(out, "Flights ({} of {total})", view.flights.len());
    let _ = writeln!(out, "{:-<60}", "");

    for flight in &view.flights {
        let stops = match flight.stops {
            0 => "nonstop".to_string(),
            1 => "1 stop".to_string(),
            n => format!("{n} stops"),
        };
        let _ = writeln!(
            out,
            "• {} — {} ({stops})",
            flight.airline,
            format_price(flight.price)
        );
        let _ = writeln!(
            out,
            "  Departure: {} | Arrival: {}",
            format_date_time(&flight.departure),
            format_date_time(&flight.arrival)
        );
    }

    out
}

/// Horizontal bar per trend point, scaled to the highest price.
#[must_use]
pub fn render_chart(trend: &[TrendPoint]) -> String {
    let mut out = String::new();

    if trend.is_empty() {
        return out;
    }

    let max = trend.iter().map(|p| p.price).fold(0.0_f64, f64::max);

    out.push_str("Price trend\n");
    for point in trend {
        // Prices are non-negative and at most `max`, so the bar fits in BAR_WIDTH.
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let width = if max > 0.0 {
            ((point.price / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "{:>3} | {:<BAR_WIDTH$} {}",
            point.position,
            "█".repeat(width),
            format_price(point.price)
        );
    }

    out
}
