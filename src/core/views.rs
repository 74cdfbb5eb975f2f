//! Role-specific dashboards rendered from [`AppState`].
//!
//! The board is picked once from the logged-in role; rendering never touches
//! the database.

use crate::core::calculator::reports::daily_report;
use crate::core::calculator::window::ProductionSchedule;
use crate::core::state::{AppState, select_active, select_periods, select_today};
use crate::models::downtime::{DowntimeEvent, minutes_between};
use crate::models::period::ProductionPeriod;
use crate::models::role::Role;
use crate::utils::formatting::{fmt_day_hm, fmt_hm, mins2readable, post_or_dash};
use crate::utils::table::Table;
use chrono::NaiveDateTime;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    OperatorBoard,
    ManagerBoard,
    AdminBoard,
    ViewerBoard,
}

impl View {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Operator => View::OperatorBoard,
            Role::Manager => View::ManagerBoard,
            Role::Admin => View::AdminBoard,
            Role::Viewer => View::ViewerBoard,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::OperatorBoard => "Operator board",
            View::ManagerBoard => "Manager board",
            View::AdminBoard => "Admin board",
            View::ViewerBoard => "Production status",
        }
    }

    pub fn render(&self, state: &AppState, now: NaiveDateTime, schedule: &ProductionSchedule, sep: &str) -> String {
        let mut out = String::new();

        let who = state.user.as_ref().map(|u| u.name.as_str()).unwrap_or("-");
        let _ = writeln!(out, "{} · {} ({})", self.title(), who, fmt_day_hm(&now));

        if let Some(err) = &state.last_error {
            let _ = writeln!(out, "Last refresh failed: {err}");
        }

        let periods = select_periods(state, now, schedule);

        match self {
            View::OperatorBoard => {
                current_post(&mut out, &periods, now);
                running_timers(&mut out, state, now, sep);
                own_downtimes(&mut out, state, now, sep);
            }
            View::ViewerBoard => {
                current_post(&mut out, &periods, now);
                running_timers(&mut out, state, now, sep);
            }
            View::ManagerBoard => {
                period_table(&mut out, &periods, sep);
                daily_summary(&mut out, state, now, sep);
                running_timers(&mut out, state, now, sep);
            }
            View::AdminBoard => {
                period_table(&mut out, &periods, sep);
                daily_summary(&mut out, state, now, sep);
                running_timers(&mut out, state, now, sep);
                machine_table(&mut out, state, sep);
                user_table(&mut out, state, sep);
            }
        }

        out
    }
}

/// Period containing `now`, or the latest one already started.
fn current_period(periods: &[ProductionPeriod], now: NaiveDateTime) -> Option<&ProductionPeriod> {
    periods.iter().rev().find(|p| p.start_time <= now)
}

fn current_post(out: &mut String, periods: &[ProductionPeriod], now: NaiveDateTime) {
    out.push('\n');
    match current_period(periods, now) {
        Some(p) => {
            let _ = writeln!(
                out,
                "Current post: {}{}  since {}  downtime {}  efficiency {}%",
                p.post_number,
                if p.continued { " (continued)" } else { "" },
                fmt_hm(&p.start_time),
                mins2readable(p.total_downtime_minutes, false, true),
                p.efficiency()
            );
        }
        None => {
            let _ = writeln!(out, "No post assigned yet");
        }
    }
}

fn running_timers(out: &mut String, state: &AppState, now: NaiveDateTime, sep: &str) {
    let active = select_active(state);

    out.push('\n');
    if active.is_empty() {
        let _ = writeln!(out, "No running downtimes");
        return;
    }

    let mut t = Table::new(&["Machine", "Since", "Running", "Operator"]).with_separator(sep);
    for e in active {
        t.add_row(vec![
            e.machine_name.clone(),
            fmt_hm(&e.start_time),
            mins2readable(minutes_between(e.start_time, now).max(0), false, true),
            e.operator_name.clone(),
        ]);
    }
    let _ = writeln!(out, "Running downtimes");
    out.push_str(&t.render());
}

fn own_downtimes(out: &mut String, state: &AppState, now: NaiveDateTime, sep: &str) {
    let Some(user) = &state.user else {
        return;
    };

    let mine: Vec<&DowntimeEvent> = select_today(state, now)
        .into_iter()
        .filter(|e| e.operator_id == user.id)
        .collect();

    out.push('\n');
    if mine.is_empty() {
        let _ = writeln!(out, "No downtimes recorded by you today");
        return;
    }

    let mut t = Table::new(&["ID", "Machine", "Start", "End", "Min", "Post", "Comment"]).with_separator(sep);
    for e in mine {
        t.add_row(vec![
            e.id.to_string(),
            e.machine_name.clone(),
            fmt_hm(&e.start_time),
            e.end_time.as_ref().map(fmt_hm).unwrap_or_else(|| "--:--".into()),
            e.duration_minutes.to_string(),
            post_or_dash(e.post_label()),
            e.comment.clone(),
        ]);
    }
    let _ = writeln!(out, "Your downtimes today");
    out.push_str(&t.render());
}

fn period_table(out: &mut String, periods: &[ProductionPeriod], sep: &str) {
    out.push('\n');
    if periods.is_empty() {
        let _ = writeln!(out, "No production periods");
        return;
    }

    let mut t = Table::new(&["Post", "Start", "End", "Duration", "Downtime", "Pause", "Eff."]).with_separator(sep);
    for p in periods {
        t.add_row(vec![
            format!("{}{}", p.post_number, if p.continued { "*" } else { "" }),
            fmt_hm(&p.start_time),
            fmt_hm(&p.end_time),
            mins2readable(p.duration_minutes, false, true),
            mins2readable(p.total_downtime_minutes, false, true),
            mins2readable(p.total_pause_minutes, false, true),
            format!("{}%", p.efficiency()),
        ]);
    }
    let _ = writeln!(out, "Production periods");
    out.push_str(&t.render());
}

fn daily_summary(out: &mut String, state: &AppState, now: NaiveDateTime, sep: &str) {
    let report = daily_report(&state.events, now.date());

    out.push('\n');
    let _ = writeln!(
        out,
        "Today: downtime {}  pause {}  running {}",
        mins2readable(report.total_downtime_minutes, false, true),
        mins2readable(report.total_pause_minutes, false, true),
        report.active
    );

    if report.machines.is_empty() {
        return;
    }

    let mut t = Table::new(&["Machine", "Stops", "Downtime", "Pause"]).with_separator(sep);
    for m in &report.machines {
        t.add_row(vec![
            m.machine.clone(),
            m.stops.to_string(),
            mins2readable(m.downtime_minutes, false, true),
            mins2readable(m.pause_minutes, false, true),
        ]);
    }
    out.push_str(&t.render());
}

fn machine_table(out: &mut String, state: &AppState, sep: &str) {
    let mut t = Table::new(&["Machine", "Status"]).with_separator(sep);
    for m in &state.machines {
        let busy = state.events.iter().any(|e| e.machine_id == m.id && e.is_active());
        let status = if m.is_marker() {
            "lot marker"
        } else if busy {
            "stopped"
        } else {
            "running"
        };
        t.add_row(vec![m.name.clone(), status.to_string()]);
    }

    out.push('\n');
    let _ = writeln!(out, "Machines");
    out.push_str(&t.render());
}

fn user_table(out: &mut String, state: &AppState, sep: &str) {
    let mut t = Table::new(&["User", "Name", "Role"]).with_separator(sep);
    for u in &state.users {
        t.add_row(vec![u.id.clone(), u.name.clone(), u.role.to_db_str().to_string()]);
    }

    out.push('\n');
    let _ = writeln!(out, "Users");
    out.push_str(&t.render());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{Action, reduce};
    use crate::models::downtime::MARKER_MACHINE;
    use crate::models::machine::Machine;
    use crate::models::user::User;
    use chrono::Duration;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn user(id: &str, role: Role) -> User {
        User {
            id: id.into(),
            name: id.to_uppercase(),
            password: "pw".into(),
            role,
        }
    }

    fn ev(id: i64, machine: &str, start: &str, minutes: Option<i64>, post: Option<&str>) -> DowntimeEvent {
        let start_time = at(start);
        DowntimeEvent {
            id,
            machine_id: if machine == MARKER_MACHINE { 1 } else { 2 },
            machine_name: machine.into(),
            start_time,
            end_time: minutes.map(|m| start_time + Duration::minutes(m)),
            duration_minutes: minutes.unwrap_or(0),
            comment: "jam".into(),
            post_number: post.map(str::to_string),
            operator_id: "anna".into(),
            operator_name: "ANNA".into(),
            created_at: String::new(),
        }
    }

    fn loaded(role: Role, events: Vec<DowntimeEvent>) -> AppState {
        let s = reduce(AppState::default(), Action::LoggedIn(user("anna", role)));
        reduce(
            s,
            Action::Refreshed {
                events,
                machines: vec![
                    Machine { id: 1, name: MARKER_MACHINE.into(), created_at: String::new() },
                    Machine { id: 2, name: "Press".into(), created_at: String::new() },
                ],
                users: vec![user("anna", role)],
                at: at("2025-06-04 10:00"),
            },
        )
    }

    #[test]
    fn view_follows_role() {
        assert_eq!(View::for_role(Role::Operator), View::OperatorBoard);
        assert_eq!(View::for_role(Role::Manager), View::ManagerBoard);
        assert_eq!(View::for_role(Role::Admin), View::AdminBoard);
        assert_eq!(View::for_role(Role::Viewer), View::ViewerBoard);
    }

    #[test]
    fn operator_without_marker_sees_no_post() {
        let state = loaded(Role::Operator, vec![ev(1, "Press", "2025-06-04 08:00", None, None)]);
        let out = View::OperatorBoard.render(&state, at("2025-06-04 10:00"), &ProductionSchedule::standard(), "-");

        assert!(out.contains("No post assigned yet"));
        assert!(out.contains("Running downtimes"));
        assert!(out.contains("02:00"));
        assert!(out.contains("Your downtimes today"));
    }

    #[test]
    fn viewer_sees_current_post_and_efficiency() {
        let state = loaded(
            Role::Viewer,
            vec![
                ev(1, MARKER_MACHINE, "2025-06-04 07:00", Some(1), Some("42")),
                ev(2, "Press", "2025-06-04 08:00", Some(30), None),
            ],
        );
        let out = View::ViewerBoard.render(&state, at("2025-06-04 10:00"), &ProductionSchedule::standard(), "-");

        assert!(out.contains("Current post: 42"));
        assert!(out.contains("efficiency 83%"));
        assert!(!out.contains("Users"));
    }

    #[test]
    fn admin_board_lists_machines_and_users() {
        let state = loaded(Role::Admin, vec![ev(1, "Press", "2025-06-04 08:00", None, None)]);
        let out = View::AdminBoard.render(&state, at("2025-06-04 10:00"), &ProductionSchedule::standard(), "=");

        assert!(out.contains("Machines"));
        assert!(out.contains("lot marker"));
        assert!(out.contains("stopped"));
        assert!(out.contains("Users"));
        assert!(out.contains("admin"));
    }

    #[test]
    fn failed_refresh_is_reported() {
        let state = reduce(
            loaded(Role::Manager, Vec::new()),
            Action::RefreshFailed {
                error: "disk I/O error".into(),
                at: at("2025-06-04 10:01"),
            },
        );
        let out = View::ManagerBoard.render(&state, at("2025-06-04 10:01"), &ProductionSchedule::standard(), "-");

        assert!(out.contains("Last refresh failed: disk I/O error"));
        assert!(out.contains("No production periods"));
    }
}
