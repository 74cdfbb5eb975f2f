use crate::cli::commands::Context;
use crate::cli::parser::Commands;
use crate::core::auth::AuthLogic;
use crate::db::queries::list_downtimes;
use crate::errors::{AppError, AppResult};
use crate::export::{ExportContent, ExportLogic};
use crate::models::role::Role;
use crate::ui::messages::{info, warning};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        periods,
        force,
    } = cmd
    {
        let path = expand_tilde(file);
        if !path.is_absolute() {
            return Err(AppError::Export(format!("Output file path must be absolute: {file}")));
        }

        let (pool, user) = ctx.session()?;
        AuthLogic::require(&user, Role::can_manage, "export data")?;

        let events = list_downtimes(&pool.conn)?;

        let content = if *periods {
            ExportContent::Periods
        } else {
            ExportContent::Downtimes
        };

        let written = ExportLogic::export(
            &events,
            ctx.now,
            &ctx.cfg.schedule()?,
            *format,
            &path,
            range.as_deref(),
            content,
            *force,
        )?;

        if written == 0 {
            warning("No records in the selected range: the file only has a header.");
        } else {
            info(format!("{written} record(s) written as {}.", format.as_str()));
        }
    }
    Ok(())
}
