use crate::cli::commands::Context;
use crate::cli::parser::Commands;
use crate::core::edit::{DowntimeChanges, EditLogic};
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    if let Commands::Edit {
        id,
        comment,
        duration,
        post,
    } = cmd
    {
        let (mut pool, user) = ctx.session()?;

        let changes = DowntimeChanges {
            comment: comment.as_deref(),
            duration_minutes: *duration,
            post_number: post.as_deref(),
        };
        let ev = EditLogic::apply(&mut pool, &user, *id, changes)?;

        success(format!(
            "Downtime #{} updated: {} → {} ({} min).",
            ev.id,
            ev.start_str(),
            ev.end_str(),
            ev.duration_minutes
        ));
    }
    Ok(())
}
