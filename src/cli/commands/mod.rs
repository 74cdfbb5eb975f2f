pub mod backup;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod del;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod machine;
pub mod periods;
pub mod posts;
pub mod report;
pub mod start;
pub mod stop;
pub mod user;

use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::db::initialize::open_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::user::User;
use crate::utils::table::Table;
use chrono::NaiveDateTime;

/// Everything a handler needs besides its own arguments.
pub struct Context<'a> {
    pub cfg: &'a Config,
    /// Clock value for the whole command (`--at` or the wall clock).
    pub now: NaiveDateTime,
    pub user: Option<&'a str>,
    pub password: Option<&'a str>,
}

impl Context<'_> {
    pub fn open(&self) -> AppResult<DbPool> {
        open_db(&self.cfg.database)
    }

    /// Open the database and authenticate the caller.
    pub fn session(&self) -> AppResult<(DbPool, User)> {
        let pool = self.open()?;
        let user = AuthLogic::login(&pool.conn, self.user, self.password)?;
        Ok((pool, user))
    }

    pub fn table<S: AsRef<str>>(&self, headers: &[S]) -> Table {
        Table::new(headers).with_separator(&self.cfg.separator_char)
    }
}
