use crate::errors::{AppError, AppResult};
use crate::models::downtime::{DowntimeEvent, TS_FORMAT};
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_DOWNTIME: &str = "SELECT id, machine_id, machine_name, start_time, end_time,
            duration_minutes, comment, post_number, operator_id, operator_name, created_at
     FROM downtimes";

fn parse_ts(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TS_FORMAT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(raw.to_string())),
        )
    })
}

fn fmt_ts(ts: &NaiveDateTime) -> String {
    ts.format(TS_FORMAT).to_string()
}

pub fn map_row(row: &Row) -> Result<DowntimeEvent> {
    let start_raw: String = row.get("start_time")?;
    let end_raw: Option<String> = row.get("end_time")?;

    let end_time = match end_raw {
        Some(s) => Some(parse_ts(&s)?),
        None => None,
    };

    Ok(DowntimeEvent {
        id: row.get("id")?,
        machine_id: row.get("machine_id")?,
        machine_name: row.get("machine_name")?,
        start_time: parse_ts(&start_raw)?,
        end_time,
        duration_minutes: row.get("duration_minutes")?,
        comment: row.get("comment")?,
        post_number: row.get("post_number")?,
        operator_id: row.get("operator_id")?,
        operator_name: row.get("operator_name")?,
        created_at: row.get("created_at")?,
    })
}

/// Full downtime log ordered by start time. Every filter runs in memory.
pub fn list_downtimes(conn: &Connection) -> AppResult<Vec<DowntimeEvent>> {
    let mut stmt = conn.prepare(&format!("{SELECT_DOWNTIME} ORDER BY start_time ASC, id ASC"))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_downtime(conn: &Connection, id: i64) -> AppResult<Option<DowntimeEvent>> {
    let mut stmt = conn.prepare(&format!("{SELECT_DOWNTIME} WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// Running downtime of a machine, if any.
pub fn find_active_for_machine(conn: &Connection, machine_id: i64) -> AppResult<Option<DowntimeEvent>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_DOWNTIME} WHERE machine_id = ?1 AND end_time IS NULL
         ORDER BY start_time DESC LIMIT 1"
    ))?;
    Ok(stmt.query_row([machine_id], map_row).optional()?)
}

/// Insert and return the id assigned by SQLite.
pub fn insert_downtime(conn: &Connection, ev: &DowntimeEvent) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO downtimes (machine_id, machine_name, start_time, end_time, duration_minutes,
                                comment, post_number, operator_id, operator_name, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            ev.machine_id,
            ev.machine_name,
            fmt_ts(&ev.start_time),
            ev.end_time.as_ref().map(fmt_ts),
            ev.duration_minutes,
            ev.comment,
            ev.post_number,
            ev.operator_id,
            ev.operator_name,
            ev.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update a downtime (all fields except id and creation data)
pub fn update_downtime(conn: &Connection, ev: &DowntimeEvent) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE downtimes
         SET machine_id = ?1, machine_name = ?2, start_time = ?3, end_time = ?4,
             duration_minutes = ?5, comment = ?6, post_number = ?7
         WHERE id = ?8",
        params![
            ev.machine_id,
            ev.machine_name,
            fmt_ts(&ev.start_time),
            ev.end_time.as_ref().map(fmt_ts),
            ev.duration_minutes,
            ev.comment,
            ev.post_number,
            ev.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::DowntimeNotFound(ev.id));
    }
    Ok(())
}

pub fn delete_downtime(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM downtimes WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::DowntimeNotFound(id));
    }
    Ok(())
}

pub fn count_downtimes_for_machine(conn: &Connection, machine_id: i64) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM downtimes WHERE machine_id = ?1",
        [machine_id],
        |row| row.get(0),
    )?)
}
