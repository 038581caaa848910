use chrono::NaiveDate;

use crate::consts::DATE_FORMAT;

/// Parse a date given as YYYYMMDD or YYYY-MM-DD
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d")
    {
        return Some(d);
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Date part of a stored timestamp, for display.
///
/// RFC 3339 timestamps are reduced to their date; anything else is returned as-is.
pub(crate) fn display_date(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.date_naive().format(DATE_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 1);
        assert_eq!(parse_date("20250301"), expected);
        assert_eq!(parse_date("2025-03-01"), expected);
    }

    #[test]
    fn rejects_other_formats() {
        assert_eq!(parse_date("03/01/2025"), None);
        assert_eq!(parse_date("2025-13-01"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn display_date_trims_timestamps() {
        assert_eq!(display_date("2025-03-01T09:15:00.123456+00:00"), "2025-03-01");
        assert_eq!(display_date("2025-03-01"), "2025-03-01");
    }
}
