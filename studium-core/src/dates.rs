//! Date helpers for schedule anchoring

use chrono::{Datelike, Duration, NaiveDate};

/// The next Monday strictly after `today`.
///
/// Used as the default start date for a new course schedule: when today is
/// a Monday the schedule starts a full week out, never today.
pub fn next_monday(today: NaiveDate) -> NaiveDate {
    let days_until = (7 - i64::from(today.weekday().num_days_from_monday())) % 7;
    let days_until = if days_until == 0 { 7 } else { days_until };
    today + Duration::days(days_until)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn test_next_monday_from_monday_is_a_week_out() {
        let monday = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        assert_eq!(monday.weekday(), Weekday::Mon);
        assert_eq!(next_monday(monday), NaiveDate::from_ymd_opt(2024, 9, 9).unwrap());
    }

    #[test]
    fn test_next_monday_from_midweek() {
        let wednesday = NaiveDate::from_ymd_opt(2024, 9, 4).unwrap();
        assert_eq!(next_monday(wednesday), NaiveDate::from_ymd_opt(2024, 9, 9).unwrap());
    }

    #[test]
    fn test_next_monday_from_sunday() {
        let sunday = NaiveDate::from_ymd_opt(2024, 9, 8).unwrap();
        assert_eq!(next_monday(sunday), NaiveDate::from_ymd_opt(2024, 9, 9).unwrap());
    }

    #[test]
    fn test_result_is_always_monday() {
        let mut day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for _ in 0..14 {
            assert_eq!(next_monday(day).weekday(), Weekday::Mon);
            day += Duration::days(1);
        }
    }
}
