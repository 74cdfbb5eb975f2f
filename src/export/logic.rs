use crate::core::calculator::periods::compute_periods_between;
use crate::core::calculator::reports::post_efficiency;
use crate::core::calculator::window::ProductionSchedule;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{DowntimeExport, ExportRecord, PeriodExport};
use crate::export::pdf_export::export_pdf;
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::models::downtime::DowntimeEvent;
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;

/// What gets written: raw downtimes or derived production periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportContent {
    Downtimes,
    Periods,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Export downtimes (or periods) whose start falls inside `range`.
    ///
    /// `range` is `None`/`"all"` or anything [`parse_range`] accepts. Period
    /// exports without a range cover the day of `now`. Returns the number of
    /// records written.
    #[allow(clippy::too_many_arguments)]
    pub fn export(
        events: &[DowntimeEvent],
        now: NaiveDateTime,
        schedule: &ProductionSchedule,
        format: ExportFormat,
        path: &Path,
        range: Option<&str>,
        content: ExportContent,
        force: bool,
    ) -> AppResult<usize> {
        ensure_writable(path, force)?;

        let bounds = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        match content {
            ExportContent::Downtimes => {
                let records: Vec<DowntimeExport> = events
                    .iter()
                    .filter(|e| in_bounds(e.start_time.date(), bounds))
                    .map(DowntimeExport::from)
                    .collect();

                write(&records, format, path, &title("Downtimes", range), "Downtimes")?;
                Ok(records.len())
            }
            ExportContent::Periods => {
                let (from, to) = match bounds {
                    Some(b) => b,
                    None if range.is_some() => span_of(events, now),
                    None => (now.date(), now.date()),
                };

                let periods = compute_periods_between(events, from, to, now, schedule);
                let records: Vec<PeriodExport> =
                    post_efficiency(&periods).iter().map(PeriodExport::from).collect();

                write(&records, format, path, &title("Production periods", range), "Periods")?;
                Ok(records.len())
            }
        }
    }
}

fn write<T: ExportRecord>(
    records: &[T],
    format: ExportFormat,
    path: &Path,
    title: &str,
    sheet: &str,
) -> AppResult<()> {
    match format {
        ExportFormat::Csv => export_csv(records, path),
        ExportFormat::Json => export_json(records, path),
        ExportFormat::Xlsx => export_xlsx(records, path, sheet),
        ExportFormat::Pdf => export_pdf(records, path, title),
    }
}

fn in_bounds(day: NaiveDate, bounds: Option<(NaiveDate, NaiveDate)>) -> bool {
    bounds.is_none_or(|(from, to)| day >= from && day <= to)
}

/// First recorded day through today.
fn span_of(events: &[DowntimeEvent], now: NaiveDateTime) -> (NaiveDate, NaiveDate) {
    let first = events
        .iter()
        .map(|e| e.start_time.date())
        .min()
        .unwrap_or(now.date());
    (first.min(now.date()), now.date())
}

fn title(what: &str, range: Option<&str>) -> String {
    match range {
        Some(r) if !r.eq_ignore_ascii_case("all") => format!("{what} {}", r.replace(':', " to ")),
        _ => what.to_string(),
    }
}
