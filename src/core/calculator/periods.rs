//! Production periods and the by-post listing.
//!
//! Both functions are pure: the full event log and the clock value come in,
//! derived rows come out. They are recomputed on every refresh.

use super::window::ProductionSchedule;
use crate::models::downtime::DowntimeEvent;
use crate::models::period::{PostGroup, ProductionPeriod};
use chrono::{NaiveDate, NaiveDateTime};

/// Production periods for the calendar day of `now`, standard site schedule.
pub fn compute_production_periods(
    events: &[DowntimeEvent],
    now: NaiveDateTime,
) -> Vec<ProductionPeriod> {
    compute_production_periods_with(events, now, &ProductionSchedule::standard())
}

/// Production periods for the calendar day of `now`.
///
/// - no window today (Sunday) → empty
/// - no marker today → one continued period if yesterday had a marker, else empty
/// - markers today → optional continued lead-in, then one period per marker
///
/// A lone continued period spans the whole window. The last marker's period
/// ends at `now` (capped at the window end) while it is still open; which
/// downtimes it holds depends only on the window end, which is inclusive.
pub fn compute_production_periods_with(
    events: &[DowntimeEvent],
    now: NaiveDateTime,
    schedule: &ProductionSchedule,
) -> Vec<ProductionPeriod> {
    let today = now.date();

    let Some(window) = schedule.window_for(today) else {
        return Vec::new();
    };
    let (window_start, window_end) = window.bounds(today);

    let todays: Vec<&DowntimeEvent> = events
        .iter()
        .filter(|e| e.start_time.date() == today)
        .collect();

    let mut markers: Vec<&DowntimeEvent> =
        todays.iter().copied().filter(|e| e.is_lot_marker()).collect();
    markers.sort_by_key(|e| e.start_time);

    let regular: Vec<&DowntimeEvent> = todays
        .iter()
        .copied()
        .filter(|e| !e.is_marker_machine())
        .collect();

    let inherited = today.pred_opt().and_then(|y| last_post_on(events, y));

    // No lot change yet today
    if markers.is_empty() {
        return match inherited {
            Some(post) => vec![build_period(
                post,
                window_start,
                window_end,
                regular,
                true,
            )],
            None => Vec::new(),
        };
    }

    let mut periods = Vec::with_capacity(markers.len() + 1);
    let first_start = markers[0].start_time;

    if let Some(post) = inherited {
        let rows = regular
            .iter()
            .copied()
            .filter(|e| e.start_time < first_start)
            .collect();

        periods.push(build_period(
            post,
            window_start,
            first_start.max(window_start),
            rows,
            true,
        ));
    }

    for (i, marker) in markers.iter().enumerate() {
        let start = marker.start_time;
        let next = markers.get(i + 1).map(|m| m.start_time);
        let end = next.unwrap_or_else(|| open_end(start, window_end, now));

        let rows = regular
            .iter()
            .copied()
            .filter(|e| {
                e.start_time >= start
                    && match next {
                        Some(n) => e.start_time < n,
                        None => e.start_time <= window_end,
                    }
            })
            .collect();

        periods.push(build_period(
            marker.post_label().unwrap_or_default(),
            start,
            end,
            rows,
            false,
        ));
    }

    periods
}

/// Downtimes between `from` and `to` (inclusive days) grouped by post.
///
/// Unlike [`compute_production_periods`], every group opened by a marker
/// lists that marker as its first row. Downtimes before the first marker in
/// range form a leading group carrying the latest earlier post, if any.
/// Marker rows never count toward the totals.
pub fn list_downtimes_by_post(
    events: &[DowntimeEvent],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<PostGroup> {
    let mut in_range: Vec<&DowntimeEvent> = events
        .iter()
        .filter(|e| {
            let d = e.start_time.date();
            d >= from && d <= to
        })
        .collect();
    in_range.sort_by_key(|e| e.start_time);

    let markers: Vec<&DowntimeEvent> = in_range
        .iter()
        .copied()
        .filter(|e| e.is_lot_marker())
        .collect();
    let regular: Vec<&DowntimeEvent> = in_range
        .iter()
        .copied()
        .filter(|e| !e.is_marker_machine())
        .collect();

    let mut groups = Vec::with_capacity(markers.len() + 1);
    let first_start = markers.first().map(|m| m.start_time);

    let leading: Vec<&DowntimeEvent> = regular
        .iter()
        .copied()
        .filter(|e| first_start.is_none_or(|f| e.start_time < f))
        .collect();

    if !leading.is_empty() {
        let inherited = events
            .iter()
            .filter(|e| e.is_lot_marker() && e.start_time.date() < from)
            .max_by_key(|e| e.start_time)
            .and_then(|e| e.post_label())
            .map(str::to_string);

        groups.push(build_group(inherited, None, leading, true));
    }

    for (i, marker) in markers.iter().enumerate() {
        let next = markers.get(i + 1).map(|m| m.start_time);

        let rows = regular
            .iter()
            .copied()
            .filter(|e| e.start_time >= marker.start_time && next.is_none_or(|n| e.start_time < n))
            .collect();

        groups.push(build_group(
            marker.post_label().map(str::to_string),
            Some(*marker),
            rows,
            false,
        ));
    }

    groups
}

/// Periods of every production day from `from` to `to`, clipped at `now`.
/// Past days are evaluated as closed, so their last period runs to the window end.
pub fn compute_periods_between(
    events: &[DowntimeEvent],
    from: NaiveDate,
    to: NaiveDate,
    now: NaiveDateTime,
    schedule: &ProductionSchedule,
) -> Vec<ProductionPeriod> {
    let last = to.min(now.date());

    from.iter_days()
        .take_while(|d| *d <= last)
        .flat_map(|day| {
            let clock = if day < now.date() {
                day.and_hms_opt(23, 59, 59).unwrap_or(now)
            } else {
                now
            };
            compute_production_periods_with(events, clock, schedule)
        })
        .collect()
}

/// Share of the period not lost to regular downtime, in whole percent
/// (half-up rounding). A zero-length period is 100 %.
pub fn efficiency(duration_minutes: i64, downtime_minutes: i64) -> i64 {
    if duration_minutes == 0 {
        return 100;
    }

    let ratio = ((duration_minutes - downtime_minutes) * 100) as f64 / duration_minutes as f64;
    (ratio + 0.5).floor() as i64
}

/// (regular downtime, pause) minutes of a set of downtimes.
pub fn split_totals<'a, I>(events: I) -> (i64, i64)
where
    I: IntoIterator<Item = &'a DowntimeEvent>,
{
    events
        .into_iter()
        .filter(|e| !e.is_marker_machine())
        .fold((0, 0), |(down, pause), e| {
            if e.is_pause() {
                (down, pause + e.duration_minutes)
            } else {
                (down + e.duration_minutes, pause)
            }
        })
}

fn last_post_on(events: &[DowntimeEvent], day: NaiveDate) -> Option<&str> {
    events
        .iter()
        .filter(|e| e.start_time.date() == day && e.is_lot_marker())
        .max_by_key(|e| e.start_time)
        .and_then(|e| e.post_label())
}

fn open_end(start: NaiveDateTime, window_end: NaiveDateTime, now: NaiveDateTime) -> NaiveDateTime {
    now.min(window_end).max(start)
}

fn build_period(
    post: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    rows: Vec<&DowntimeEvent>,
    continued: bool,
) -> ProductionPeriod {
    let mut downtimes: Vec<DowntimeEvent> = rows.into_iter().cloned().collect();
    downtimes.sort_by_key(|e| e.start_time);

    let (total_downtime_minutes, total_pause_minutes) = split_totals(&downtimes);

    ProductionPeriod {
        post_number: post.to_string(),
        start_time: start,
        end_time: end,
        duration_minutes: crate::models::downtime::minutes_between(start, end),
        downtimes,
        total_downtime_minutes,
        total_pause_minutes,
        continued,
    }
}

fn build_group(
    post: Option<String>,
    marker: Option<&DowntimeEvent>,
    rows: Vec<&DowntimeEvent>,
    continued: bool,
) -> PostGroup {
    let (total_downtime_minutes, total_pause_minutes) = split_totals(rows.iter().copied());

    let mut all: Vec<DowntimeEvent> = Vec::with_capacity(rows.len() + 1);
    if let Some(m) = marker {
        all.push(m.clone());
    }
    all.extend(rows.into_iter().cloned());

    PostGroup {
        post_number: post,
        marker: marker.cloned(),
        rows: all,
        total_downtime_minutes,
        total_pause_minutes,
        continued,
    }
}
