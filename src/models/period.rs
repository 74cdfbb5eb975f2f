use super::downtime::DowntimeEvent;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Span of production between two lot markers (or the window bounds).
/// Derived on every read, never stored.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProductionPeriod {
    pub post_number: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_minutes: i64,
    pub downtimes: Vec<DowntimeEvent>,
    pub total_downtime_minutes: i64,
    pub total_pause_minutes: i64,
    /// Post inherited from the previous day's last marker.
    pub continued: bool,
}

impl ProductionPeriod {
    pub fn efficiency(&self) -> i64 {
        crate::core::calculator::periods::efficiency(
            self.duration_minutes,
            self.total_downtime_minutes,
        )
    }
}

/// One group of the by-post listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PostGroup {
    pub post_number: Option<String>,
    pub marker: Option<DowntimeEvent>,
    /// Marker first (when present), then the post's downtimes by start time.
    pub rows: Vec<DowntimeEvent>,
    pub total_downtime_minutes: i64,
    pub total_pause_minutes: i64,
    pub continued: bool,
}
