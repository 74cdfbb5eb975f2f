use crate::cli::commands::Context;
use crate::cli::parser::Commands;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    if let Commands::Log { print } = cmd {
        if *print {
            let pool = ctx.open()?;
            LogLogic::print_log(&pool)?;
        } else {
            info("Nothing to do: use `log --print`.");
        }
    }
    Ok(())
}
