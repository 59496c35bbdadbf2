//! Date formatting.

use chrono::NaiveDate;
use thiserror::Error;

/// Display format for dates (`31/01/2024`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

const ISO_FORMAT: &str = "%Y-%m-%d";

/// A date string in neither accepted format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid date '{0}', expected dd/mm/yyyy")]
pub struct DateParseError(pub String);

/// Formats a date as `dd/mm/yyyy`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses `dd/mm/yyyy` or ISO `yyyy-mm-dd`, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns `DateParseError` when neither format matches.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, ISO_FORMAT))
        .map_err(|_| DateParseError(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_format_date_pads() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "05/03/2024");
    }

    #[rstest]
    #[case("31/01/2024")]
    #[case("2024-01-31")]
    #[case("  31/01/2024 ")]
    fn test_parse_date_accepts(#[case] input: &str) {
        assert_eq!(parse_date(input), Ok(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
    }

    #[rstest]
    #[case("")]
    #[case("31/02/2024")]
    #[case("01-31-2024")]
    #[case("mañana")]
    fn test_parse_date_rejects(#[case] input: &str) {
        assert!(parse_date(input).is_err());
    }

    #[test]
    fn test_round_trip_display() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(parse_date(&format_date(date)), Ok(date));
    }
}
