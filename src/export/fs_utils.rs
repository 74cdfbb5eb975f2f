use crate::errors::{AppError, AppResult};
use std::path::Path;

/// An existing output file is only replaced with `force`.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    Err(AppError::Conflict(format!(
        "The file '{}' already exists (use --force to overwrite).",
        path.display()
    )))
}
