use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::NaiveDateTime;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let count = |sql: &str| -> rusqlite::Result<i64> { pool.conn.query_row(sql, [], |row| row.get(0)) };

    let downtimes = count("SELECT COUNT(*) FROM downtimes")?;
    let active = count("SELECT COUNT(*) FROM downtimes WHERE end_time IS NULL")?;
    let machines = count("SELECT COUNT(*) FROM machines")?;
    let users = count("SELECT COUNT(*) FROM users")?;

    println!("{}• Downtimes:{} {}{}{} ({} active)", CYAN, RESET, GREEN, downtimes, RESET, active);
    println!("{}• Machines:{} {}", CYAN, RESET, machines);
    println!("{}• Users:{} {}", CYAN, RESET, users);

    //
    // 3) DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT start_time FROM downtimes ORDER BY start_time ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT start_time FROM downtimes ORDER BY start_time DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first.clone().unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.clone().unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE DOWNTIMES/DAY
    //
    if let (Some(f), Some(l)) = (first, last) {
        let d1 = parse_ts(&f)?;
        let d2 = parse_ts(&l)?;
        let days = (d2.date() - d1.date()).num_days().max(1);

        let avg = downtimes as f64 / days as f64;
        println!("{}• Average downtimes/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}

fn parse_ts(raw: &str) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, crate::models::downtime::TS_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}
