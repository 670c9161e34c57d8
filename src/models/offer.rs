//! Wire schema of the Amadeus flight-offers response.
//!
//! Every field is optional and decoded leniently: a field of the wrong type
//! reads as absent instead of failing the whole response, and the mapper
//! substitutes sentinels for it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightOffersResponse {
    #[serde(default, deserialize_with = "lenient_offers")]
    pub data: Vec<RawOffer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawOffer {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<OfferPrice>,

    #[serde(default, deserialize_with = "lenient")]
    pub validating_airline_codes: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient")]
    pub itineraries: Option<Vec<Itinerary>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OfferPrice {
    /// Decimal string, e.g. `"150.00"`. Bare numbers are accepted too.
    #[serde(default, deserialize_with = "lenient_text")]
    pub total: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Itinerary {
    #[serde(default, deserialize_with = "lenient")]
    pub duration: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub segments: Option<Vec<Segment>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    #[serde(default, deserialize_with = "lenient")]
    pub departure: Option<SegmentEndpoint>,

    #[serde(default, deserialize_with = "lenient")]
    pub arrival: Option<SegmentEndpoint>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub carrier_code: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub number: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SegmentEndpoint {
    #[serde(default, deserialize_with = "lenient")]
    pub iata_code: Option<String>,

    /// Local ISO timestamp without offset, e.g. `"2026-02-01T08:00:00"`.
    #[serde(default, deserialize_with = "lenient")]
    pub at: Option<String>,
}

/// Any well-formed JSON value; `None` when it does not fit `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Strings as-is, numbers in their decimal form, anything else `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Keeps one record per array entry; entries that are not offer objects
/// become empty offers. A non-array `data` reads as no offers.
fn lenient_offers<'de, D>(deserializer: D) -> Result<Vec<RawOffer>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(entries) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    Ok(entries
        .into_iter()
        .map(|entry| serde_json::from_value(entry).unwrap_or_default())
        .collect())
}

impl RawOffer {
    /// Segments of the first itinerary, empty when the offer has none.
    #[must_use]
    pub fn first_itinerary_segments(&self) -> &[Segment] {
        self.itineraries
            .as_deref()
            .and_then(|itineraries| itineraries.first())
            .and_then(|itinerary| itinerary.segments.as_deref())
            .unwrap_or_default()
    }
}
