//! Calendar-day helpers
//!
//! All scheduling in the app is calendar-day granular in local wall-clock
//! time. Dates are `chrono::NaiveDate` in memory and ISO `YYYY-MM-DD` on the
//! wire, so ordering on the serialized form matches ordering on the value.

use chrono::{Duration, Local, NaiveDate};

/// Today's date in local wall-clock time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Shift a date by a signed number of days.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Whether `last` is the calendar day immediately before `today`.
pub fn is_yesterday(last: NaiveDate, today: NaiveDate) -> bool {
    last == add_days(today, -1)
}

/// Clamp a float into `[min, max]`.
pub fn clamp_f32(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_add_days_crosses_month_boundary() {
        assert_eq!(add_days(d("2026-01-31"), 1), d("2026-02-01"));
        assert_eq!(add_days(d("2026-03-01"), -1), d("2026-02-28"));
    }

    #[test]
    fn test_add_days_crosses_leap_day() {
        assert_eq!(add_days(d("2024-02-28"), 1), d("2024-02-29"));
        assert_eq!(add_days(d("2024-02-28"), 2), d("2024-03-01"));
    }

    #[test]
    fn test_is_yesterday() {
        assert!(is_yesterday(d("2026-08-29"), d("2026-08-30")));
        assert!(!is_yesterday(d("2026-08-28"), d("2026-08-30")));
        assert!(!is_yesterday(d("2026-08-30"), d("2026-08-30")));
    }

    #[test]
    fn test_iso_ordering_matches_date_ordering() {
        let a = d("2026-09-30");
        let b = d("2026-10-01");
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }

    #[test]
    fn test_clamp_f32() {
        assert_eq!(clamp_f32(2.5, 1.3, 3.0), 2.5);
        assert_eq!(clamp_f32(0.9, 1.3, 3.0), 1.3);
        assert_eq!(clamp_f32(4.2, 1.3, 3.0), 3.0);
    }
}
