//! Date helper functions

use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;

/// Format a date in long US English form (like "January 5, 2024")
pub fn long_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Today's calendar date, in `tz` when given, else in local time
pub fn today(tz: Option<Tz>) -> NaiveDate {
    match tz {
        Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
        None => Local::now().date_naive(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(long_date(&date), "January 15, 2024");
    }

    #[test]
    fn test_long_date_has_no_zero_padding() {
        let date = NaiveDate::from_ymd_opt(2023, 9, 5).unwrap();
        assert_eq!(long_date(&date), "September 5, 2023");
    }

    #[test]
    fn test_today_in_timezone_is_near_local_today() {
        let local = Local::now().date_naive();
        let tokyo = today(Some(chrono_tz::Asia::Tokyo));
        assert!((tokyo - local).num_days().abs() <= 1);
    }
}
