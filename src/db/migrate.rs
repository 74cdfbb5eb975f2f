use crate::models::downtime::MARKER_MACHINE;
use crate::ui::messages::{success, warning};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, params};

/// Ensure that the `log` table exists. It also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the core tables (machines, users, downtimes).
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS machines (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS users (
            id       TEXT PRIMARY KEY,
            name     TEXT NOT NULL,
            password TEXT NOT NULL,
            role     TEXT NOT NULL CHECK(role IN ('operator','manager','admin','viewer'))
        );

        CREATE TABLE IF NOT EXISTS downtimes (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            machine_id       INTEGER NOT NULL,
            machine_name     TEXT NOT NULL,
            start_time       TEXT NOT NULL,
            end_time         TEXT,
            duration_minutes INTEGER NOT NULL DEFAULT 0,
            comment          TEXT NOT NULL DEFAULT '',
            post_number      TEXT,
            operator_id      TEXT NOT NULL,
            operator_name    TEXT NOT NULL,
            created_at       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_downtimes_start ON downtimes(start_time);
        CREATE INDEX IF NOT EXISTS idx_downtimes_machine_open ON downtimes(machine_id, end_time);
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        params![Local::now().to_rfc3339(), version, message],
    )?;
    Ok(())
}

/// The marker machine must always exist so a lot change can be recorded.
fn seed_marker_machine(conn: &Connection) -> Result<()> {
    let version = "20250601_0001_seed_marker_machine";
    if is_applied(conn, version)? {
        return Ok(());
    }

    conn.execute(
        "INSERT OR IGNORE INTO machines (name, created_at) VALUES (?1, ?2)",
        params![MARKER_MACHINE, Local::now().to_rfc3339()],
    )?;

    mark_applied(conn, version, "Seeded lot marker machine")?;
    success(format!("Migration applied: {version} → '{MARKER_MACHINE}' machine"));
    Ok(())
}

/// Bootstrap administrator, only when no user exists yet.
fn seed_admin_user(conn: &Connection) -> Result<()> {
    let version = "20250601_0002_seed_admin_user";
    if is_applied(conn, version)? {
        return Ok(());
    }

    let users: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    if users == 0 {
        conn.execute(
            "INSERT INTO users (id, name, password, role)
             VALUES ('admin', 'Administrator', 'admin', 'admin')",
            [],
        )?;
        warning("Created default user 'admin' (password 'admin'): change it with `user passwd`.");
    }

    mark_applied(conn, version, "Seeded default administrator")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db() and `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Core schema
    let fresh = !table_exists(conn, "downtimes")?;
    create_schema(conn)?;
    if fresh {
        success("Created downtimes, machines and users tables.");
    }

    // 3) Versioned data migrations
    seed_marker_machine(conn)?;
    seed_admin_user(conn)?;

    Ok(())
}
