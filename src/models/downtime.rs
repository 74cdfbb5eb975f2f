use super::machine::Machine;
use super::user::User;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;

/// Machine name reserved for lot-change markers.
/// A closed event on this machine announces the start of a new post.
pub const MARKER_MACHINE: &str = "Omposting/Korigering";

/// Timestamp layout used in the `downtimes` table.
pub const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DowntimeEvent {
    pub id: i64,
    pub machine_id: i64,
    pub machine_name: String,
    pub start_time: NaiveDateTime,       // ⇔ downtimes.start_time (local wall clock)
    pub end_time: Option<NaiveDateTime>, // NULL while the timer runs
    pub duration_minutes: i64,
    pub comment: String,
    pub post_number: Option<String>,
    pub operator_id: String,
    pub operator_name: String,
    pub created_at: String, // ISO8601
}

impl DowntimeEvent {
    /// Build a new, still running, downtime for `machine` started by `operator`.
    /// `id = 0` until the store assigns one.
    pub fn open(machine: &Machine, operator: &User, start: NaiveDateTime) -> Self {
        Self {
            id: 0,
            machine_id: machine.id,
            machine_name: machine.name.clone(),
            start_time: start,
            end_time: None,
            duration_minutes: 0,
            comment: String::new(),
            post_number: None,
            operator_id: operator.id.clone(),
            operator_name: operator.name.clone(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    /// True for every event recorded on the marker machine, with or without a post.
    pub fn is_marker_machine(&self) -> bool {
        self.machine_name == MARKER_MACHINE
    }

    /// A lot marker bounds production periods: marker machine *and* a post label.
    pub fn is_lot_marker(&self) -> bool {
        self.is_marker_machine() && self.post_label().is_some()
    }

    /// Pauses are recognised by machine name ("Pause", "Lunsj pause", ...).
    pub fn is_pause(&self) -> bool {
        self.machine_name.to_lowercase().contains("pause")
    }

    /// Post number, treating an empty or blank value as missing.
    pub fn post_label(&self) -> Option<&str> {
        self.post_number
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// Close the timer. Duration is whole minutes, rounded down.
    pub fn close(&mut self, end: NaiveDateTime, comment: &str, post_number: Option<String>) {
        self.end_time = Some(end);
        self.duration_minutes = minutes_between(self.start_time, end);
        self.comment = comment.trim().to_string();
        self.post_number = post_number;
    }

    pub fn start_str(&self) -> String {
        self.start_time.format("%Y-%m-%d %H:%M").to_string()
    }

    pub fn end_str(&self) -> String {
        match self.end_time {
            Some(t) => t.format("%Y-%m-%d %H:%M").to_string(),
            None => "--:--".to_string(),
        }
    }
}

/// Whole minutes between two timestamps, floor for non-negative spans.
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_seconds().div_euclid(60)
}
