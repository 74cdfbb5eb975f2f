use crate::core::auth::AuthLogic;
use crate::db::log::audit;
use crate::db::machines::require_machine;
use crate::db::pool::DbPool;
use crate::db::queries::{find_active_for_machine, insert_downtime, update_downtime};
use crate::errors::{AppError, AppResult};
use crate::models::downtime::DowntimeEvent;
use crate::models::role::Role;
use crate::models::user::User;
use chrono::NaiveDateTime;

/// Start/stop of a machine's downtime timer.
pub struct TimerLogic;

impl TimerLogic {
    /// Open a downtime on `machine_name` at `at`.
    /// At most one running downtime per machine.
    pub fn start(
        pool: &mut DbPool,
        user: &User,
        machine_name: &str,
        at: NaiveDateTime,
    ) -> AppResult<DowntimeEvent> {
        AuthLogic::require(user, Role::can_record, "start a downtime")?;

        let machine = require_machine(&pool.conn, machine_name)?;

        if find_active_for_machine(&pool.conn, machine.id)?.is_some() {
            return Err(AppError::MachineBusy(machine.name));
        }

        let mut ev = DowntimeEvent::open(&machine, user, at);

        pool.in_transaction(|conn| {
            ev.id = insert_downtime(conn, &ev)?;
            audit(
                conn,
                "start",
                &machine.name,
                &format!("#{} started at {} by {}", ev.id, ev.start_str(), user.id),
            )
        })?;

        Ok(ev)
    }

    /// Close the running downtime of `machine_name`.
    ///
    /// A comment is always required; the lot marker machine also needs a post number.
    pub fn stop(
        pool: &mut DbPool,
        user: &User,
        machine_name: &str,
        comment: &str,
        post_number: Option<&str>,
        at: NaiveDateTime,
    ) -> AppResult<DowntimeEvent> {
        AuthLogic::require(user, Role::can_record, "stop a downtime")?;

        let machine = require_machine(&pool.conn, machine_name)?;

        let mut ev = find_active_for_machine(&pool.conn, machine.id)?
            .ok_or_else(|| AppError::NoActiveDowntime(machine.name.clone()))?;

        if comment.trim().is_empty() {
            return Err(AppError::MissingComment);
        }

        let post = post_number
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        if machine.is_marker() && post.is_none() {
            return Err(AppError::MissingPostNumber(machine.name));
        }

        if at < ev.start_time {
            return Err(AppError::InvalidTime(format!(
                "stop time {} is earlier than start {}",
                at.format("%Y-%m-%d %H:%M"),
                ev.start_str()
            )));
        }

        ev.close(at, comment, post);

        pool.in_transaction(|conn| {
            update_downtime(conn, &ev)?;
            audit(
                conn,
                "stop",
                &machine.name,
                &format!(
                    "#{} stopped after {} min: {}",
                    ev.id, ev.duration_minutes, ev.comment
                ),
            )
        })?;

        Ok(ev)
    }
}
