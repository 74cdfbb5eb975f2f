use crate::errors::{AppError, AppResult};
use crate::models::machine::Machine;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_machine(row: &Row) -> rusqlite::Result<Machine> {
    Ok(Machine {
        id: row.get("id")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
    })
}

pub fn list_machines(conn: &Connection) -> AppResult<Vec<Machine>> {
    let mut stmt = conn.prepare("SELECT id, name, created_at FROM machines ORDER BY name ASC")?;
    let rows = stmt.query_map([], map_machine)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Case-insensitive lookup by name.
pub fn find_machine(conn: &Connection, name: &str) -> AppResult<Option<Machine>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, created_at FROM machines WHERE name = ?1 COLLATE NOCASE LIMIT 1",
    )?;
    Ok(stmt.query_row([name.trim()], map_machine).optional()?)
}

pub fn require_machine(conn: &Connection, name: &str) -> AppResult<Machine> {
    find_machine(conn, name)?.ok_or_else(|| AppError::UnknownMachine(name.to_string()))
}

pub fn insert_machine(conn: &Connection, name: &str) -> AppResult<Machine> {
    let created_at = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO machines (name, created_at) VALUES (?1, ?2)",
        params![name.trim(), created_at],
    )?;

    Ok(Machine {
        id: conn.last_insert_rowid(),
        name: name.trim().to_string(),
        created_at,
    })
}

/// Rename a machine and the denormalized name kept on its downtimes.
pub fn rename_machine(conn: &Connection, id: i64, new_name: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE machines SET name = ?1 WHERE id = ?2",
        params![new_name.trim(), id],
    )?;
    conn.execute(
        "UPDATE downtimes SET machine_name = ?1 WHERE machine_id = ?2",
        params![new_name.trim(), id],
    )?;
    Ok(())
}

pub fn delete_machine(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM machines WHERE id = ?1", [id])?;
    Ok(())
}
