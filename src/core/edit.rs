use crate::core::auth::AuthLogic;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{get_downtime, update_downtime};
use crate::errors::{AppError, AppResult};
use crate::models::downtime::DowntimeEvent;
use crate::models::role::Role;
use crate::models::user::User;
use chrono::Duration;

/// Fields a manager may correct on a recorded downtime.
#[derive(Debug, Default)]
pub struct DowntimeChanges<'a> {
    pub comment: Option<&'a str>,
    pub duration_minutes: Option<i64>,
    /// `Some("")` clears the post number.
    pub post_number: Option<&'a str>,
}

pub struct EditLogic;

impl EditLogic {
    pub fn apply(
        pool: &mut DbPool,
        user: &User,
        id: i64,
        changes: DowntimeChanges<'_>,
    ) -> AppResult<DowntimeEvent> {
        AuthLogic::require(user, Role::can_manage, "edit downtimes")?;

        let mut ev = get_downtime(&pool.conn, id)?.ok_or(AppError::DowntimeNotFound(id))?;

        if changes.comment.is_none()
            && changes.duration_minutes.is_none()
            && changes.post_number.is_none()
        {
            return Err(AppError::Conflict(
                "Nothing to do: specify at least --comment, --duration or --post.".into(),
            ));
        }

        let mut summary = Vec::new();

        if let Some(comment) = changes.comment {
            if comment.trim().is_empty() {
                return Err(AppError::MissingComment);
            }
            ev.comment = comment.trim().to_string();
            summary.push("comment".to_string());
        }

        if let Some(minutes) = changes.duration_minutes {
            if minutes < 0 {
                return Err(AppError::InvalidDuration(minutes.to_string()));
            }
            if ev.is_active() {
                return Err(AppError::InvalidDuration(
                    "a running downtime has no duration yet".into(),
                ));
            }
            // keep end_time consistent with the corrected duration
            ev.duration_minutes = minutes;
            ev.end_time = Some(ev.start_time + Duration::minutes(minutes));
            summary.push(format!("duration={minutes}"));
        }

        if let Some(post) = changes.post_number {
            let post = post.trim();
            if post.is_empty() {
                if ev.is_marker_machine() {
                    return Err(AppError::MissingPostNumber(ev.machine_name));
                }
                ev.post_number = None;
            } else {
                ev.post_number = Some(post.to_string());
            }
            summary.push(format!("post={post}"));
        }

        pool.in_transaction(|conn| {
            update_downtime(conn, &ev)?;
            audit(
                conn,
                "edit",
                &ev.machine_name,
                &format!("#{} edited by {}: {}", ev.id, user.id, summary.join(", ")),
            )
        })?;

        Ok(ev)
    }
}
