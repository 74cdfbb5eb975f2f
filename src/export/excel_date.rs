use chrono::{NaiveDate, NaiveDateTime};

/// Excel serial + number format for timestamp cells, `None` for anything else.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    const DT_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

    DT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .and_then(|dt| excel_serial(&dt))
        .map(|serial| ("yyyy-mm-dd hh:mm", serial))
}

fn excel_serial(dt: &NaiveDateTime) -> Option<f64> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let secs = (*dt - epoch).num_seconds() as f64;
    Some(secs / 86400.0)
}
