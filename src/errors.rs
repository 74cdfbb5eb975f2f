//! Unified application error type.
//! Every layer (db, core, cli, export) returns AppError so failures surface
//! the same way in `main`.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    // ---------------------------
    // Shop-floor logic errors
    // ---------------------------
    #[error("Unknown machine: {0}")]
    UnknownMachine(String),

    #[error("Machine '{0}' already has an active downtime")]
    MachineBusy(String),

    #[error("No active downtime for machine '{0}'")]
    NoActiveDowntime(String),

    #[error("A comment is required to stop a downtime")]
    MissingComment,

    #[error("A post number is required for '{0}'")]
    MissingPostNumber(String),

    #[error("Downtime #{0} not found")]
    DowntimeNotFound(i64),

    #[error("{0}")]
    Conflict(String),

    // ---------------------------
    // Access errors
    // ---------------------------
    #[error("Authentication failed for user '{0}'")]
    AuthFailed(String),

    #[error("Missing credentials: use --user and --password")]
    MissingCredentials,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User '{0}' not found")]
    UserNotFound(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
