//! Normalizes raw offers into [`FlightRecord`]s.

use crate::models::{FlightRecord, NOT_AVAILABLE, RawOffer};
use crate::models::offer::SegmentEndpoint;

/// Maps offers in input order. Never drops a record: absent fields become
/// sentinels (`0.0` price, `"N/A"` text).
#[must_use]
pub fn map_offers(offers: &[RawOffer]) -> Vec<FlightRecord> {
    offers
        .iter()
        .enumerate()
        .map(|(index, offer)| map_offer(index + 1, offer))
        .collect()
}

fn map_offer(position: usize, offer: &RawOffer) -> FlightRecord {
    let segments = offer.first_itinerary_segments();

    let departure = segments
        .first()
        .and_then(|s| endpoint_time(s.departure.as_ref()));
    let arrival = segments
        .last()
        .and_then(|s| endpoint_time(s.arrival.as_ref()));

    FlightRecord {
        id: offer
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| position.to_string()),
        price: parse_price(offer),
        airline: offer
            .validating_airline_codes
            .as_ref()
            .and_then(|codes| codes.first())
            .filter(|code| !code.is_empty())
            .cloned()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        stops: u32::try_from(segments.len().saturating_sub(1)).unwrap_or(u32::MAX),
        departure: departure.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        arrival: arrival.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}

fn parse_price(offer: &RawOffer) -> f64 {
    offer
        .price
        .as_ref()
        .and_then(|p| p.total.as_deref())
        .and_then(|total| total.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

fn endpoint_time(endpoint: Option<&SegmentEndpoint>) -> Option<String> {
    endpoint
        .and_then(|e| e.at.clone())
        .filter(|at| !at.is_empty())
}
