use crate::cli::commands::Context;
use crate::cli::parser::Commands;
use crate::core::timer::TimerLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    if let Commands::Stop {
        machine,
        comment,
        post,
    } = cmd
    {
        let (mut pool, user) = ctx.session()?;
        let ev = TimerLogic::stop(&mut pool, &user, machine, comment, post.as_deref(), ctx.now)?;

        let post_note = ev
            .post_label()
            .map(|p| format!(", post {p}"))
            .unwrap_or_default();

        success(format!(
            "Downtime #{} on '{}' stopped: {} min{}.",
            ev.id, ev.machine_name, ev.duration_minutes, post_note
        ));
    }
    Ok(())
}
