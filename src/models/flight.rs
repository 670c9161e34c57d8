use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placeholder for a field the upstream record did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightRecord {
    pub id: String,

    /// Total fare, currency-less. `0.0` when the offer carried no price.
    pub price: f64,

    /// First validating carrier code or [`NOT_AVAILABLE`].
    pub airline: String,

    pub stops: u32,

    pub departure: String,

    pub arrival: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchCriteria {
    pub origin: String,

    pub destination: String,

    pub departure_date: NaiveDate,
}

impl SearchCriteria {
    #[must_use]
    pub fn new(origin: &str, destination: &str, departure_date: NaiveDate) -> Self {
        Self {
            origin: normalize_location(origin),
            destination: normalize_location(destination),
            departure_date,
        }
    }

    pub fn set_origin(&mut self, origin: &str) {
        self.origin = normalize_location(origin);
    }

    pub fn set_destination(&mut self, destination: &str) {
        self.destination = normalize_location(destination);
    }
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            origin: "JFK".to_string(),
            destination: "LAX".to_string(),
            departure_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap_or_default(),
        }
    }
}

fn normalize_location(code: &str) -> String {
    code.trim().to_uppercase()
}
