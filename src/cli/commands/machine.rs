use crate::cli::commands::Context;
use crate::cli::parser::{Commands, MachineAction};
use crate::core::admin::AdminLogic;
use crate::db::machines::list_machines;
use crate::db::queries::list_downtimes;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    let Commands::Machine { action } = cmd else {
        return Ok(());
    };

    let (mut pool, me) = ctx.session()?;

    match action {
        MachineAction::Add { name } => {
            let m = AdminLogic::add_machine(&mut pool, &me, name)?;
            success(format!("Machine '{}' added.", m.name));
        }
        MachineAction::List => {
            // any logged-in role may see the machine list
            let machines = list_machines(&pool.conn)?;
            let events = list_downtimes(&pool.conn)?;

            let mut t = ctx.table(&["ID", "Machine", "Status"]);
            for m in machines {
                let status = if m.is_marker() {
                    "lot marker"
                } else if events.iter().any(|e| e.machine_id == m.id && e.is_active()) {
                    "stopped"
                } else {
                    "running"
                };
                t.add_row(vec![m.id.to_string(), m.name, status.to_string()]);
            }
            print!("{}", t.render());
        }
        MachineAction::Del { name } => {
            AdminLogic::remove_machine(&mut pool, &me, name)?;
            success(format!("Machine '{name}' deleted."));
        }
        MachineAction::Rename { name, new_name } => {
            AdminLogic::rename_machine(&mut pool, &me, name, new_name)?;
            success(format!("Machine '{name}' renamed to '{}'.", new_name.trim()));
        }
    }

    Ok(())
}
