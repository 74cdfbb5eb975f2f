use crate::cli::commands::Context;
use crate::cli::parser::{Commands, UserAction};
use crate::core::admin::AdminLogic;
use crate::core::auth::AuthLogic;
use crate::db::users::list_users;
use crate::errors::AppResult;
use crate::models::role::Role;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };

    let (mut pool, me) = ctx.session()?;

    match action {
        UserAction::Add {
            id,
            name,
            new_password,
            role,
        } => {
            let user = AdminLogic::add_user(
                &mut pool,
                &me,
                id,
                name.as_deref().unwrap_or(""),
                new_password,
                *role,
            )?;
            success(format!("User '{}' added as {}.", user.id, user.role.to_db_str()));
        }
        UserAction::List => {
            AuthLogic::require(&me, Role::can_administer, "list users")?;

            let users = list_users(&pool.conn)?;
            if users.is_empty() {
                info("No users.");
                return Ok(());
            }

            let mut t = ctx.table(&["User", "Name", "Role"]);
            for u in users {
                t.add_row(vec![u.id, u.name, u.role.to_db_str().to_string()]);
            }
            print!("{}", t.render());
        }
        UserAction::Del { id } => {
            AdminLogic::remove_user(&mut pool, &me, id)?;
            success(format!("User '{id}' deleted."));
        }
        UserAction::Passwd { id, new_password } => {
            let target = id.as_deref().unwrap_or(me.id.as_str());
            AdminLogic::set_password(&mut pool, &me, target, new_password)?;
            success(format!("Password changed for '{target}'."));
        }
        UserAction::Role { id, role } => {
            AdminLogic::set_role(&mut pool, &me, id, *role)?;
            success(format!("User '{id}' is now {}.", role.to_db_str()));
        }
    }

    Ok(())
}
