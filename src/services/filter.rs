//! Client-side filtering of a result set and the derived price trend.
//!
//! Everything here is pure; callers re-derive the view after each change of
//! records or criteria instead of patching it.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::FlightRecord;

const ANY_AIRLINE: &str = "any";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AirlineFilter {
    #[default]
    Any,
    Code(String),
}

impl AirlineFilter {
    #[must_use]
    pub fn matches(&self, airline: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Code(code) => code == airline,
        }
    }
}

impl From<&str> for AirlineFilter {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ANY_AIRLINE) {
            Self::Any
        } else {
            Self::Code(value.to_uppercase())
        }
    }
}

impl From<String> for AirlineFilter {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<AirlineFilter> for String {
    fn from(value: AirlineFilter) -> Self {
        value.to_string()
    }
}

impl FromStr for AirlineFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for AirlineFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "{ANY_AIRLINE}"),
            Self::Code(code) => write!(f, "{code}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub max_price: f64,

    pub max_stops: u32,

    pub airline: AirlineFilter,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            max_price: 10_000.0,
            max_stops: 3,
            airline: AirlineFilter::Any,
        }
    }
}

impl FilterCriteria {
    /// A price bound must be a finite, non-negative number; `NaN` would
    /// reject every record.
    #[must_use]
    pub fn is_valid_max_price(value: f64) -> bool {
        value.is_finite() && value >= 0.0
    }

    #[must_use]
    pub fn accepts(&self, record: &FlightRecord) -> bool {
        record.price <= self.max_price
            && record.stops <= self.max_stops
            && self.airline.matches(&record.airline)
    }
}

/// Parses a user-supplied price bound.
pub fn parse_max_price(value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| FilterCriteria::is_valid_max_price(*p))
        .ok_or_else(|| format!("Invalid price: {value}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    /// 1-based position in the filtered list.
    pub position: usize,

    pub price: f64,
}

/// Displayed flights plus their chart series, always derived together.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlightView {
    pub flights: Vec<FlightRecord>,

    pub trend: Vec<TrendPoint>,
}

impl FlightView {
    #[must_use]
    pub fn derive(records: &[FlightRecord], criteria: &FilterCriteria) -> Self {
        let flights = apply_filters(records, criteria);
        let trend = price_trend(&flights);
        Self { flights, trend }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}

/// Keeps the records accepted by all three predicates, in input order.
#[must_use]
pub fn apply_filters(records: &[FlightRecord], criteria: &FilterCriteria) -> Vec<FlightRecord> {
    records
        .iter()
        .filter(|record| criteria.accepts(record))
        .cloned()
        .collect()
}

#[must_use]
pub fn price_trend(records: &[FlightRecord]) -> Vec<TrendPoint> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| TrendPoint {
            position: index + 1,
            price: record.price,
        })
        .collect()
}

/// Distinct airlines of a result set, sorted, for the airline selector.
#[must_use]
pub fn airline_options(records: &[FlightRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.airline.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_AVAILABLE;

    fn record(id: &str, price: f64, airline: &str, stops: u32) -> FlightRecord {
        FlightRecord {
            id: id.to_string(),
            price,
            airline: airline.to_string(),
            stops,
            departure: "2026-02-01T08:00:00".to_string(),
            arrival: "2026-02-01T11:00:00".to_string(),
        }
    }

    fn sample() -> Vec<FlightRecord> {
        vec![
            record("1", 150.0, "AA", 0),
            record("2", 400.0, "DL", 1),
            record("3", 900.0, "UA", 2),
            record("4", 220.0, "AA", 2),
            record("5", 80.0, NOT_AVAILABLE, 0),
        ]
    }

    fn ids(records: &[FlightRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_price_and_stops_bound_with_any_airline() {
        let records = vec![
            record("1", 150.0, "AA", 0),
            record("2", 400.0, "DL", 1),
            record("3", 900.0, "UA", 2),
        ];
        let criteria = FilterCriteria {
            max_price: 500.0,
            max_stops: 1,
            airline: AirlineFilter::Any,
        };

        assert_eq!(ids(&apply_filters(&records, &criteria)), vec!["1", "2"]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let criteria = FilterCriteria {
            max_price: 400.0,
            max_stops: 1,
            airline: AirlineFilter::Any,
        };
        assert_eq!(ids(&apply_filters(&sample(), &criteria)), vec!["1", "2", "5"]);
    }

    #[test]
    fn test_airline_filter() {
        let criteria = FilterCriteria {
            airline: AirlineFilter::from("aa"),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &criteria)), vec!["1", "4"]);

        let criteria = FilterCriteria {
            airline: AirlineFilter::from(NOT_AVAILABLE),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &criteria)), vec!["5"]);
    }

    #[test]
    fn test_filtered_records_are_ordered_subset_satisfying_criteria() {
        let records = sample();
        let grid = [
            (0.0, 0, AirlineFilter::Any),
            (250.0, 0, AirlineFilter::Any),
            (250.0, 2, AirlineFilter::from("AA")),
            (1_000.0, 5, AirlineFilter::from("UA")),
            (1_000.0, 5, AirlineFilter::from("ZZ")),
        ];

        for (max_price, max_stops, airline) in grid {
            let criteria = FilterCriteria {
                max_price,
                max_stops,
                airline,
            };
            let filtered = apply_filters(&records, &criteria);

            assert!(filtered.iter().all(|r| criteria.accepts(r)));

            let mut cursor = records.iter();
            for kept in &filtered {
                assert!(cursor.any(|r| r == kept), "not an ordered subset");
            }

            assert_eq!(apply_filters(&records, &criteria), filtered);
        }
    }

    #[test]
    fn test_price_trend_follows_filtered_order() {
        let criteria = FilterCriteria {
            max_stops: 1,
            ..FilterCriteria::default()
        };
        let view = FlightView::derive(&sample(), &criteria);

        assert_eq!(ids(&view.flights), vec!["1", "2", "5"]);
        assert_eq!(
            view.trend,
            vec![
                TrendPoint { position: 1, price: 150.0 },
                TrendPoint { position: 2, price: 400.0 },
                TrendPoint { position: 3, price: 80.0 },
            ]
        );
    }

    #[test]
    fn test_airline_options_are_distinct_and_sorted() {
        assert_eq!(airline_options(&sample()), vec!["AA", "DL", NOT_AVAILABLE, "UA"]);
        assert!(airline_options(&[]).is_empty());
    }

    #[test]
    fn test_parse_max_price() {
        assert_eq!(parse_max_price("500"), Ok(500.0));
        assert_eq!(parse_max_price(" 0 "), Ok(0.0));
        assert!(parse_max_price("NaN").is_err());
        assert!(parse_max_price("inf").is_err());
        assert!(parse_max_price("-5").is_err());
        assert!(parse_max_price("cheap").is_err());
    }

    #[test]
    fn test_airline_filter_parsing() {
        assert_eq!(AirlineFilter::from("ANY"), AirlineFilter::Any);
        assert_eq!(AirlineFilter::from(""), AirlineFilter::Any);
        assert_eq!(AirlineFilter::from(" ba "), AirlineFilter::Code("BA".to_string()));
        assert_eq!(AirlineFilter::Code("BA".to_string()).to_string(), "BA");
        assert_eq!(AirlineFilter::Any.to_string(), "any");
    }
}
