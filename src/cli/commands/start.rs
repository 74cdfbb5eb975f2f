use crate::cli::commands::Context;
use crate::cli::parser::Commands;
use crate::core::timer::TimerLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    if let Commands::Start { machine } = cmd {
        let (mut pool, user) = ctx.session()?;
        let ev = TimerLogic::start(&mut pool, &user, machine, ctx.now)?;

        success(format!(
            "Downtime #{} started on '{}' at {}.",
            ev.id,
            ev.machine_name,
            ev.start_time.format("%H:%M")
        ));
    }
    Ok(())
}
