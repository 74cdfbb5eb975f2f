//! Explicit application state for the dashboards.
//!
//! The state only changes through [`reduce`]; everything shown on screen is
//! derived by the selectors from the state plus a clock value.

use crate::core::calculator::periods::compute_production_periods_with;
use crate::core::calculator::window::ProductionSchedule;
use crate::models::downtime::DowntimeEvent;
use crate::models::machine::Machine;
use crate::models::period::ProductionPeriod;
use crate::models::user::User;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub user: Option<User>,
    pub events: Vec<DowntimeEvent>,
    pub machines: Vec<Machine>,
    /// Only filled for administrators.
    pub users: Vec<User>,
    pub last_error: Option<String>,
    pub refreshed_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub enum Action {
    LoggedIn(User),
    Refreshed {
        events: Vec<DowntimeEvent>,
        machines: Vec<Machine>,
        users: Vec<User>,
        at: NaiveDateTime,
    },
    /// A fetch failed: the cached collections are emptied.
    RefreshFailed { error: String, at: NaiveDateTime },
    LoggedOut,
}

pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        Action::LoggedIn(user) => AppState {
            user: Some(user),
            ..AppState::default()
        },
        Action::Refreshed {
            events,
            machines,
            users,
            at,
        } => AppState {
            events,
            machines,
            users,
            last_error: None,
            refreshed_at: Some(at),
            ..state
        },
        Action::RefreshFailed { error, at } => AppState {
            events: Vec::new(),
            machines: Vec::new(),
            users: Vec::new(),
            last_error: Some(error),
            refreshed_at: Some(at),
            ..state
        },
        Action::LoggedOut => AppState::default(),
    }
}

pub fn select_periods(
    state: &AppState,
    now: NaiveDateTime,
    schedule: &ProductionSchedule,
) -> Vec<ProductionPeriod> {
    compute_production_periods_with(&state.events, now, schedule)
}

/// Running downtimes, oldest first.
pub fn select_active(state: &AppState) -> Vec<&DowntimeEvent> {
    let mut active: Vec<&DowntimeEvent> = state.events.iter().filter(|e| e.is_active()).collect();
    active.sort_by_key(|e| e.start_time);
    active
}

/// Downtimes started on the calendar day of `now`.
pub fn select_today(state: &AppState, now: NaiveDateTime) -> Vec<&DowntimeEvent> {
    let today = now.date();
    state
        .events
        .iter()
        .filter(|e| e.start_time.date() == today)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role::Role;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn user() -> User {
        User {
            id: "anna".into(),
            name: "Anna".into(),
            password: "pw".into(),
            role: Role::Operator,
        }
    }

    fn running(machine: &str, start: &str) -> DowntimeEvent {
        DowntimeEvent {
            id: 1,
            machine_id: 1,
            machine_name: machine.into(),
            start_time: at(start),
            end_time: None,
            duration_minutes: 0,
            comment: String::new(),
            post_number: None,
            operator_id: "anna".into(),
            operator_name: "Anna".into(),
            created_at: String::new(),
        }
    }

    #[test]
    fn refresh_replaces_collections_and_keeps_user() {
        let s = reduce(AppState::default(), Action::LoggedIn(user()));
        let s = reduce(
            s,
            Action::Refreshed {
                events: vec![running("Press", "2025-06-04 08:00")],
                machines: Vec::new(),
                users: Vec::new(),
                at: at("2025-06-04 08:05"),
            },
        );

        assert_eq!(s.user.as_ref().map(|u| u.id.as_str()), Some("anna"));
        assert_eq!(s.events.len(), 1);
        assert_eq!(select_active(&s).len(), 1);
        assert_eq!(select_today(&s, at("2025-06-04 12:00")).len(), 1);
        assert!(select_today(&s, at("2025-06-05 12:00")).is_empty());
    }

    #[test]
    fn failed_refresh_empties_the_cache() {
        let s = reduce(AppState::default(), Action::LoggedIn(user()));
        let s = reduce(
            s,
            Action::Refreshed {
                events: vec![running("Press", "2025-06-04 08:00")],
                machines: Vec::new(),
                users: Vec::new(),
                at: at("2025-06-04 08:05"),
            },
        );
        let s = reduce(
            s,
            Action::RefreshFailed {
                error: "database is locked".into(),
                at: at("2025-06-04 08:10"),
            },
        );

        assert!(s.events.is_empty());
        assert_eq!(s.last_error.as_deref(), Some("database is locked"));
        assert!(s.user.is_some());
        assert!(select_periods(&s, at("2025-06-04 08:10"), &ProductionSchedule::standard()).is_empty());
    }

    #[test]
    fn logout_clears_everything() {
        let s = reduce(AppState::default(), Action::LoggedIn(user()));
        let s = reduce(s, Action::LoggedOut);
        assert!(s.user.is_none());
        assert!(s.refreshed_at.is_none());
    }
}
