use crate::cli::commands::Context;
use crate::cli::parser::Commands;
use crate::core::del::DeleteLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    if let Commands::Del { id } = cmd {
        let (mut pool, user) = ctx.session()?;
        let ev = DeleteLogic::apply(&mut pool, &user, *id)?;

        success(format!("Downtime #{} on '{}' deleted.", ev.id, ev.machine_name));
    }
    Ok(())
}
