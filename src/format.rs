use chrono::{DateTime, NaiveDateTime};

#[must_use]
pub fn format_price(value: f64) -> String {
    format!("${value:.2}")
}

/// Renders an offer timestamp as medium date + short time, e.g.
/// `Feb 1, 2026, 8:00 AM`. Unparseable input (including the `"N/A"`
/// sentinel) is returned unchanged.
#[must_use]
pub fn format_date_time(value: &str) -> String {
    const DISPLAY: &str = "%b %-d, %Y, %-I:%M %p";

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return naive.format(DISPLAY).to_string();
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return with_offset.naive_local().format(DISPLAY).to_string();
    }

    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_AVAILABLE;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(150.0), "$150.00");
        assert_eq!(format_price(412.5), "$412.50");
        assert_eq!(format_price(0.0), "$0.00");
    }

    #[test]
    fn test_format_date_time() {
        assert_eq!(format_date_time("2026-02-01T08:00:00"), "Feb 1, 2026, 8:00 AM");
        assert_eq!(format_date_time("2026-12-24T17:45:00"), "Dec 24, 2026, 5:45 PM");
        assert_eq!(
            format_date_time("2026-02-01T08:00:00+01:00"),
            "Feb 1, 2026, 8:00 AM"
        );
    }

    #[test]
    fn test_format_date_time_passes_through_unparseable() {
        assert_eq!(format_date_time(NOT_AVAILABLE), NOT_AVAILABLE);
        assert_eq!(format_date_time("tomorrow"), "tomorrow");
    }
}
