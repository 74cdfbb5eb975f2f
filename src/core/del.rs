use crate::core::auth::AuthLogic;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_downtime, get_downtime};
use crate::errors::{AppError, AppResult};
use crate::models::downtime::DowntimeEvent;
use crate::models::role::Role;
use crate::models::user::User;

pub struct DeleteLogic;

impl DeleteLogic {
    pub fn apply(pool: &mut DbPool, user: &User, id: i64) -> AppResult<DowntimeEvent> {
        AuthLogic::require(user, Role::can_manage, "delete downtimes")?;

        let ev = get_downtime(&pool.conn, id)?.ok_or(AppError::DowntimeNotFound(id))?;

        pool.in_transaction(|conn| {
            delete_downtime(conn, id)?;
            audit(
                conn,
                "del",
                &ev.machine_name,
                &format!("#{} ({}) deleted by {}", id, ev.start_str(), user.id),
            )
        })?;

        Ok(ev)
    }
}
