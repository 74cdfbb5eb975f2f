use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDate, NaiveDateTime};

/// Clock value for one command: `--at` when given, the local wall clock otherwise.
pub fn resolve_now(at: Option<&str>) -> AppResult<NaiveDateTime> {
    match at {
        Some(s) => parse_datetime(s),
        None => Ok(Local::now().naive_local()),
    }
}

/// Accepts `YYYY-MM-DD HH:MM[:SS]` or `YYYY-MM-DDTHH:MM[:SS]`.
pub fn parse_datetime(s: &str) -> AppResult<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s.trim(), fmt).ok())
        .ok_or_else(|| AppError::InvalidTime(s.to_string()))
}

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// `--date` when given, otherwise the day of `now`.
pub fn day_or_today(date: Option<&str>, now: NaiveDateTime) -> AppResult<NaiveDate> {
    match date {
        Some(d) => parse_date(d),
        None => Ok(now.date()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_layouts() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 4)
            .unwrap()
            .and_hms_opt(7, 30, 0)
            .unwrap();

        assert_eq!(parse_datetime("2025-06-04 07:30").unwrap(), expected);
        assert_eq!(parse_datetime("2025-06-04T07:30:00").unwrap(), expected);
        assert!(parse_datetime("04/06/2025 07:30").is_err());
        assert_eq!(resolve_now(Some("2025-06-04 07:30")).unwrap(), expected);
    }
}
