use crate::core::calculator::reports::PostEfficiency;
use crate::models::downtime::{DowntimeEvent, TS_FORMAT};
use serde::Serialize;

/// A flat record every export format can write.
pub trait ExportRecord: Serialize {
    fn headers() -> &'static [&'static str];
    fn to_row(&self) -> Vec<String>;
}

/// One recorded downtime.
#[derive(Serialize, Clone, Debug)]
pub struct DowntimeExport {
    pub id: i64,
    pub machine: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i64,
    pub post_number: String,
    pub comment: String,
    pub operator: String,
    pub lot_marker: bool,
}

impl From<&DowntimeEvent> for DowntimeExport {
    fn from(e: &DowntimeEvent) -> Self {
        Self {
            id: e.id,
            machine: e.machine_name.clone(),
            start_time: e.start_time.format(TS_FORMAT).to_string(),
            end_time: e
                .end_time
                .map(|t| t.format(TS_FORMAT).to_string())
                .unwrap_or_default(),
            duration_minutes: e.duration_minutes,
            post_number: e.post_label().unwrap_or_default().to_string(),
            comment: e.comment.clone(),
            operator: e.operator_name.clone(),
            lot_marker: e.is_marker_machine(),
        }
    }
}

impl ExportRecord for DowntimeExport {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "machine",
            "start_time",
            "end_time",
            "duration_minutes",
            "post_number",
            "comment",
            "operator",
            "lot_marker",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.machine.clone(),
            self.start_time.clone(),
            self.end_time.clone(),
            self.duration_minutes.to_string(),
            self.post_number.clone(),
            self.comment.clone(),
            self.operator.clone(),
            if self.lot_marker { "yes" } else { "no" }.to_string(),
        ]
    }
}

/// One production period with its efficiency.
#[derive(Serialize, Clone, Debug)]
pub struct PeriodExport {
    pub post_number: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i64,
    pub downtime_minutes: i64,
    pub pause_minutes: i64,
    pub efficiency: i64,
    pub continued: bool,
}

impl From<&PostEfficiency> for PeriodExport {
    fn from(p: &PostEfficiency) -> Self {
        Self {
            post_number: p.post_number.clone(),
            start_time: p.start_time.format(TS_FORMAT).to_string(),
            end_time: p.end_time.format(TS_FORMAT).to_string(),
            duration_minutes: p.duration_minutes,
            downtime_minutes: p.downtime_minutes,
            pause_minutes: p.pause_minutes,
            efficiency: p.efficiency,
            continued: p.continued,
        }
    }
}

impl ExportRecord for PeriodExport {
    fn headers() -> &'static [&'static str] {
        &[
            "post_number",
            "start_time",
            "end_time",
            "duration_minutes",
            "downtime_minutes",
            "pause_minutes",
            "efficiency",
            "continued",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.post_number.clone(),
            self.start_time.clone(),
            self.end_time.clone(),
            self.duration_minutes.to_string(),
            self.downtime_minutes.to_string(),
            self.pause_minutes.to_string(),
            self.efficiency.to_string(),
            if self.continued { "yes" } else { "no" }.to_string(),
        ]
    }
}

pub(crate) fn records_to_table<T: ExportRecord>(records: &[T]) -> Vec<Vec<String>> {
    records.iter().map(ExportRecord::to_row).collect()
}
