use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::models::user::User;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_user(row: &Row) -> rusqlite::Result<User> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidRole(role_str.clone())),
        )
    })?;

    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        password: row.get("password")?,
        role,
    })
}

pub fn find_user(conn: &Connection, id: &str) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare("SELECT id, name, password, role FROM users WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_user).optional()?)
}

pub fn list_users(conn: &Connection) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare("SELECT id, name, password, role FROM users ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_user)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_user(conn: &Connection, user: &User) -> AppResult<()> {
    conn.execute(
        "INSERT INTO users (id, name, password, role) VALUES (?1, ?2, ?3, ?4)",
        params![user.id, user.name, user.password, user.role.to_db_str()],
    )?;
    Ok(())
}

pub fn update_password(conn: &Connection, id: &str, password: &str) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE users SET password = ?1 WHERE id = ?2",
        params![password, id],
    )?;
    if changed == 0 {
        return Err(AppError::UserNotFound(id.to_string()));
    }
    Ok(())
}

pub fn update_role(conn: &Connection, id: &str, role: Role) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE users SET role = ?1 WHERE id = ?2",
        params![role.to_db_str(), id],
    )?;
    if changed == 0 {
        return Err(AppError::UserNotFound(id.to_string()));
    }
    Ok(())
}

pub fn delete_user(conn: &Connection, id: &str) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::UserNotFound(id.to_string()));
    }
    Ok(())
}

pub fn count_admins(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM users WHERE role = 'admin'",
        [],
        |row| row.get(0),
    )?)
}
