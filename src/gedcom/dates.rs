//! GEDCOM date string parsing
//!
//! Malformed and partial dates are common in real files (year-only, ranges,
//! `ABT`/`BEF` qualifiers), so nothing here returns an error: a date that
//! cannot be read becomes `None` and the record keeps loading.

use chrono::NaiveDate;
use tracing::debug;

/// Parse an event date of the form day, abbreviated month name, year
/// (e.g. `12 MAR 1930`). Used for birth and death dates.
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    match NaiveDate::parse_from_str(trimmed, "%d %b %Y") {
        Ok(date) => Some(date),
        Err(_) => {
            debug!(date = trimmed, "unparseable event date, treating as absent");
            None
        }
    }
}

/// Parse a date with fallbacks for partial forms: the exact event form,
/// then `MAR 1930` (first of the month), then `1930` (January 1), then ISO
/// `1930-03-12`. Used for marriage dates, which the source declares in
/// looser shapes than birth and death.
pub fn parse_loose_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d %b %Y") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let date = match tokens.as_slice() {
        [month, year] => {
            let year: i32 = year.parse().ok()?;
            NaiveDate::from_ymd_opt(year, month_number(month)?, 1)
        }
        [year] => {
            let year: i32 = year.parse().ok()?;
            NaiveDate::from_ymd_opt(year, 1, 1)
        }
        _ => None,
    };
    if date.is_none() {
        debug!(date = trimmed, "unparseable date, treating as absent");
    }
    date
}

fn month_number(abbrev: &str) -> Option<u32> {
    let month = match abbrev.to_ascii_uppercase().as_str() {
        "JAN" => 1,
        "FEB" => 2,
        "MAR" => 3,
        "APR" => 4,
        "MAY" => 5,
        "JUN" => 6,
        "JUL" => 7,
        "AUG" => 8,
        "SEP" => 9,
        "OCT" => 10,
        "NOV" => 11,
        "DEC" => 12,
        _ => return None,
    };
    Some(month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_date_forms() {
        assert_eq!(
            parse_event_date("12 MAR 1930"),
            NaiveDate::from_ymd_opt(1930, 3, 12)
        );
        assert_eq!(
            parse_event_date("1 JAN 1900"),
            NaiveDate::from_ymd_opt(1900, 1, 1)
        );
        // qualifiers and partial dates are absent, not errors
        assert_eq!(parse_event_date("ABT 1900"), None);
        assert_eq!(parse_event_date("1900"), None);
        assert_eq!(parse_event_date(""), None);
    }

    #[test]
    fn test_loose_date_fallbacks() {
        assert_eq!(
            parse_loose_date("12 MAR 1930"),
            NaiveDate::from_ymd_opt(1930, 3, 12)
        );
        assert_eq!(
            parse_loose_date("MAR 1930"),
            NaiveDate::from_ymd_opt(1930, 3, 1)
        );
        assert_eq!(parse_loose_date("1930"), NaiveDate::from_ymd_opt(1930, 1, 1));
        assert_eq!(
            parse_loose_date("1930-03-12"),
            NaiveDate::from_ymd_opt(1930, 3, 12)
        );
        assert_eq!(parse_loose_date("BET 1900 AND 1910"), None);
    }
}
