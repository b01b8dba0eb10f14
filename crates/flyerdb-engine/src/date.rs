//! Publication-date parsing for flyer headers.

use chrono::{Datelike, Month, NaiveDate, Weekday};
use flyerdb_core::FlyerDate;

use crate::error::EngineError;

/// Parses a yearless flyer date such as `"Thu Jun 12"`.
///
/// The text must be abbreviated weekday, abbreviated month and day-of-month,
/// whitespace-separated; full names such as `"Thursday"` are rejected.
/// The year comes from `reference_year`. The weekday is validated as a
/// weekday name but not checked against the resulting date, since the
/// reference year is an assumption.
///
/// # Errors
///
/// Returns [`EngineError::DateFormat`] if the text does not have that shape
/// or names a day that does not exist in the reference year.
pub fn parse_flyer_date(display_text: &str, reference_year: i32) -> Result<FlyerDate, EngineError> {
    let fail = |reason: &str| EngineError::DateFormat {
        text: display_text.to_string(),
        reason: reason.to_string(),
    };

    let mut tokens = display_text.split_whitespace();
    let (Some(weekday), Some(month), Some(day), None) =
        (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(fail("expected \"<weekday> <month> <day>\""));
    };

    if weekday.len() != 3 || month.len() != 3 {
        return Err(fail("weekday and month must be three-letter abbreviations"));
    }

    let weekday = weekday
        .parse::<Weekday>()
        .map_err(|_| fail("unrecognized weekday"))?;
    let month = month
        .parse::<Month>()
        .map_err(|_| fail("unrecognized month"))?;

    if day.is_empty() || day.len() > 2 || !day.bytes().all(|b| b.is_ascii_digit()) {
        return Err(fail("day must be one or two digits"));
    }
    let day: u32 = day.parse().map_err(|_| fail("day must be one or two digits"))?;

    let date = NaiveDate::from_ymd_opt(reference_year, month.number_from_month(), day)
        .ok_or_else(|| fail("no such day in the reference year"))?;

    if date.weekday() != weekday {
        tracing::debug!(
            text = display_text,
            reference_year,
            actual = %date.weekday(),
            "flyer weekday does not match the reference year"
        );
    }

    Ok(FlyerDate::new(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_abbreviated_header() {
        let date = parse_flyer_date("Thu Jun 12", 2024).unwrap();
        assert_eq!(date.to_string(), "2024-06-12");
    }

    #[test]
    fn tolerates_surrounding_whitespace_and_single_digit_day() {
        let date = parse_flyer_date("  Fri Mar 7\n", 2025).unwrap();
        assert_eq!(date.to_string(), "2025-03-07");
    }

    #[test]
    fn uses_reference_year() {
        let date = parse_flyer_date("Wed Jan 01", 2025).unwrap();
        assert_eq!(date.to_string(), "2025-01-01");
    }

    #[test]
    fn rejects_missing_weekday() {
        let err = parse_flyer_date("Jun 12", 2024).unwrap_err();
        assert!(matches!(err, EngineError::DateFormat { ref text, .. } if text == "Jun 12"));
    }

    #[test]
    fn rejects_full_weekday_and_month_names() {
        assert!(parse_flyer_date("Thursday Jun 12", 2024).is_err());
        assert!(parse_flyer_date("Thu June 12", 2024).is_err());
    }

    #[test]
    fn rejects_trailing_tokens() {
        assert!(parse_flyer_date("Thu Jun 12 2024", 2024).is_err());
    }

    #[test]
    fn rejects_unknown_month() {
        let err = parse_flyer_date("Thu Jux 12", 2024).unwrap_err();
        assert!(
            matches!(err, EngineError::DateFormat { ref reason, .. } if reason == "unrecognized month")
        );
    }

    #[test]
    fn rejects_non_numeric_day() {
        assert!(parse_flyer_date("Thu Jun twelve", 2024).is_err());
        assert!(parse_flyer_date("Thu Jun 123", 2024).is_err());
    }

    #[test]
    fn rejects_leap_day_outside_leap_year() {
        assert!(parse_flyer_date("Sat Feb 29", 2024).is_ok());
        assert!(parse_flyer_date("Sat Feb 29", 2025).is_err());
    }

    #[test]
    fn rejects_empty_text() {
        assert!(parse_flyer_date("", 2024).is_err());
    }
}
