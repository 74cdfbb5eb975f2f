use crate::cli::commands::Context;
use crate::cli::parser::Commands;
use crate::core::backup::BackupLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    if let Commands::Backup { file, compress, force } = cmd {
        let dest = expand_tilde(file);
        if !dest.is_absolute() {
            return Err(AppError::Conflict(format!("Backup path must be absolute: {file}")));
        }

        let pool = ctx.open()?;
        let written = BackupLogic::backup(&pool, &ctx.cfg.database, &dest, *compress, *force)?;

        success(format!("Backup created: {}", written.display()));
    }
    Ok(())
}
