//! Inclusive date-range enumeration
//!
//! Feeds the work-day picker: whenever the trip window changes, the
//! candidate days are recomputed from this function.

use chrono::{Datelike, NaiveDate, Weekday};

/// Date format used everywhere in the UI (input, display, JSON).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Enumerate every calendar day in `[start, end]`, ascending.
///
/// Returns an empty vec when either bound is missing or `end < start`.
pub fn range_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Vec<NaiveDate> {
    let (start, end) = match (start, end) {
        (Some(s), Some(e)) if s <= e => (s, e),
        _ => return Vec::new(),
    };

    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Parse a user-typed date in `YYYY-MM-DD` form.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

/// Short Portuguese weekday label, used next to work-day candidates.
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "seg",
        Weekday::Tue => "ter",
        Weekday::Wed => "qua",
        Weekday::Thu => "qui",
        Weekday::Fri => "sex",
        Weekday::Sat => "sáb",
        Weekday::Sun => "dom",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_range_days_inclusive_ascending() {
        let days = range_days(Some(date("2024-07-01")), Some(date("2024-07-03")));
        assert_eq!(
            days,
            vec![date("2024-07-01"), date("2024-07-02"), date("2024-07-03")]
        );
    }

    #[test]
    fn test_range_days_single_day() {
        let days = range_days(Some(date("2024-07-01")), Some(date("2024-07-01")));
        assert_eq!(days, vec![date("2024-07-01")]);
    }

    #[test]
    fn test_range_days_length_matches_span() {
        let start = date("2024-02-27");
        let end = date("2024-03-02");
        let days = range_days(Some(start), Some(end));
        let span = (end - start).num_days() as usize + 1;
        assert_eq!(days.len(), span);
        assert!(days.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_range_days_reversed_bounds_empty() {
        let days = range_days(Some(date("2024-07-03")), Some(date("2024-07-01")));
        assert!(days.is_empty());
    }

    #[test]
    fn test_range_days_missing_bound_empty() {
        assert!(range_days(None, Some(date("2024-07-03"))).is_empty());
        assert!(range_days(Some(date("2024-07-01")), None).is_empty());
        assert!(range_days(None, None).is_empty());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-07-01"), Some(date("2024-07-01")));
        assert_eq!(parse_date("  2024-07-01  "), Some(date("2024-07-01")));
        assert_eq!(parse_date("01/07/2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_weekday_label() {
        assert_eq!(weekday_label(date("2024-07-01")), "seg");
        assert_eq!(weekday_label(date("2024-07-07")), "dom");
    }
}
