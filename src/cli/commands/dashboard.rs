use crate::cli::commands::Context;
use crate::cli::parser::Commands;
use crate::core::state::{Action, AppState, reduce};
use crate::core::views::View;
use crate::db::machines::list_machines;
use crate::db::pool::DbPool;
use crate::db::queries::list_downtimes;
use crate::db::users::list_users;
use crate::errors::AppResult;
use crate::models::downtime::DowntimeEvent;
use crate::models::machine::Machine;
use crate::models::user::User;
use crate::ui::messages::error;
use chrono::{Local, NaiveDateTime};
use std::thread;
use std::time::Duration;

pub fn handle(cmd: &Commands, ctx: &Context, clock_pinned: bool) -> AppResult<()> {
    let Commands::Dashboard { watch } = cmd else {
        return Ok(());
    };

    let (pool, user) = ctx.session()?;
    let view = View::for_role(user.role);
    let schedule = ctx.cfg.schedule()?;
    let interval = Duration::from_secs(ctx.cfg.refresh_secs(user.role));

    let mut state = reduce(AppState::default(), Action::LoggedIn(user.clone()));
    let mut now = ctx.now;

    loop {
        state = reduce(state, refresh(&pool, &user, now));

        if *watch {
            print!("\x1b[2J\x1b[H");
        }
        print!("{}", view.render(&state, now, &schedule, &ctx.cfg.separator_char));

        if let Some(err) = &state.last_error {
            error(format!("Refresh failed: {err}"));
        }

        if !*watch {
            break;
        }

        thread::sleep(interval);
        if !clock_pinned {
            now = Local::now().naive_local();
        }
    }

    Ok(())
}

/// One poll of the store, folded into an action for the reducer.
fn refresh(pool: &DbPool, user: &User, at: NaiveDateTime) -> Action {
    match load(pool, user) {
        Ok((events, machines, users)) => Action::Refreshed {
            events,
            machines,
            users,
            at,
        },
        Err(e) => Action::RefreshFailed {
            error: e.to_string(),
            at,
        },
    }
}

fn load(pool: &DbPool, user: &User) -> AppResult<(Vec<DowntimeEvent>, Vec<Machine>, Vec<User>)> {
    let events = list_downtimes(&pool.conn)?;
    let machines = list_machines(&pool.conn)?;
    let users = if user.role.can_administer() {
        list_users(&pool.conn)?
    } else {
        Vec::new()
    };
    Ok((events, machines, users))
}
