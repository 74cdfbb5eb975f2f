use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Duration, NaiveDate};

/// Parse a `--period`/`--range` expression into inclusive calendar bounds.
///
/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or two of the same shape joined
/// by `:` (e.g. `2025-06-02:2025-06-08`).
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    let (from, to) = match r.split_once(':') {
        Some((start, end)) => {
            let (start, end) = (start.trim(), end.trim());
            if start.len() != end.len() {
                return Err(AppError::InvalidDate(format!("{r} (start and end must have the same format)")));
            }
            (bound(start)?.0, bound(end)?.1)
        }
        None => bound(r)?,
    };

    if from > to {
        return Err(AppError::InvalidDate(format!("{r} (start after end)")));
    }

    Ok((from, to))
}

/// First and last day covered by a single year, month or day.
fn bound(s: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(s.to_string());

    match s.len() {
        4 => {
            let y: i32 = s.parse().map_err(|_| invalid())?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((first, last))
        }
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((first, last_of_month(first).ok_or_else(invalid)?))
        }
        10 => {
            let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

fn last_of_month(first: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1).map(|next| next - Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn single_bounds() {
        assert_eq!(parse_range("2025").unwrap(), (d(2025, 1, 1), d(2025, 12, 31)));
        assert_eq!(parse_range("2024-02").unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
        assert_eq!(parse_range("2025-06-04").unwrap(), (d(2025, 6, 4), d(2025, 6, 4)));
    }

    #[test]
    fn intervals() {
        assert_eq!(
            parse_range("2025-06-02:2025-06-08").unwrap(),
            (d(2025, 6, 2), d(2025, 6, 8))
        );
        assert_eq!(parse_range("2025-11:2025-12").unwrap(), (d(2025, 11, 1), d(2025, 12, 31)));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_range("2025-06:2025-06-08").is_err());
        assert!(parse_range("2025-13").is_err());
        assert!(parse_range("2025-06-08:2025-06-01").is_err());
        assert!(parse_range("june").is_err());
    }
}
