//! Date helpers
//!
//! Date-string conversion happens at the API handler layer only;
//! repositories, validator and pricing work with `i64` Unix millis.

use chrono::{DateTime, NaiveDate, Utc};

/// Milliseconds in a calendar day
pub const MS_PER_DAY: i64 = 86_400_000;

/// Parse a date-ish string to Unix millis.
///
/// Accepts plain `YYYY-MM-DD` (taken as midnight UTC) and full RFC 3339.
pub fn parse_fecha(s: &str) -> Option<i64> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis());
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).timestamp_millis())
}

/// `[start, end)` millis bounds of a calendar day (UTC)
pub fn day_bounds(date: NaiveDate) -> (i64, i64) {
    let start = date
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc()
        .timestamp_millis();
    (start, start + MS_PER_DAY)
}

/// Duration of a stay in days: ceil of the millisecond difference.
///
/// A partial day counts as a full day, so a 14:00 check-in to next-day
/// 10:00 check-out is still one day.
pub fn cantidad_dias(inicio: i64, fin: i64) -> i64 {
    (fin - inicio).unsigned_abs().div_ceil(MS_PER_DAY as u64) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_date() {
        assert_eq!(parse_fecha("1970-01-02"), Some(MS_PER_DAY));
    }

    #[test]
    fn parse_rfc3339() {
        assert_eq!(
            parse_fecha("1970-01-01T12:00:00Z"),
            Some(MS_PER_DAY / 2)
        );
    }

    #[test]
    fn parse_garbage_is_none() {
        assert_eq!(parse_fecha("not-a-date"), None);
        assert_eq!(parse_fecha("2024-13-40"), None);
    }

    #[test]
    fn whole_days_are_exact() {
        assert_eq!(cantidad_dias(0, 4 * MS_PER_DAY), 4);
    }

    #[test]
    fn partial_day_rounds_up() {
        assert_eq!(cantidad_dias(0, MS_PER_DAY + 1), 2);
        assert_eq!(cantidad_dias(0, MS_PER_DAY / 2), 1);
    }

    #[test]
    fn day_bounds_are_half_open() {
        let d = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
        assert_eq!(day_bounds(d), (MS_PER_DAY, 2 * MS_PER_DAY));
    }
}
