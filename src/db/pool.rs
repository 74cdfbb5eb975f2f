//! SQLite connection wrapper (one connection per CLI invocation).

use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }

    /// Run `func` inside a transaction; rolled back if it fails.
    pub fn in_transaction<F, T>(&mut self, func: F) -> crate::errors::AppResult<T>
    where
        F: FnOnce(&Connection) -> crate::errors::AppResult<T>,
    {
        let tx = self.conn.transaction()?;
        let out = func(&tx)?;
        tx.commit()?;
        Ok(out)
    }
}
