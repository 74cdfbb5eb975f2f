//! Formatting helpers shared by the CLI views and exports.

use chrono::NaiveDateTime;

/// Minutes as `HHh MMm` (or `HH:MM` when `short`), optionally signed.
pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = match (want_sign, mins.signum()) {
        (true, 1) => "+",
        (true, -1) => "-",
        _ => "",
    };

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

pub fn fmt_hm(ts: &NaiveDateTime) -> String {
    ts.format("%H:%M").to_string()
}

pub fn fmt_day_hm(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// `"-"` for a missing post number.
pub fn post_or_dash(post: Option<&str>) -> String {
    post.unwrap_or("-").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_minutes() {
        assert_eq!(mins2readable(145, false, false), "02h 25m");
        assert_eq!(mins2readable(145, true, true), "+02:25");
        assert_eq!(mins2readable(-70, true, false), "-01h 10m");
        assert_eq!(mins2readable(0, true, true), "00:00");
    }
}
