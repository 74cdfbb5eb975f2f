use super::periods::split_totals;
use crate::models::downtime::DowntimeEvent;
use crate::models::period::ProductionPeriod;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct MachineTotals {
    pub machine: String,
    pub stops: usize,
    pub active: usize,
    pub downtime_minutes: i64,
    pub pause_minutes: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailyReport {
    pub day: NaiveDate,
    pub machines: Vec<MachineTotals>,
    pub total_downtime_minutes: i64,
    pub total_pause_minutes: i64,
    pub active: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DayTotals {
    pub day: NaiveDate,
    pub stops: usize,
    pub downtime_minutes: i64,
    pub pause_minutes: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WeeklyReport {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub days: Vec<DayTotals>,
    pub machines: Vec<MachineTotals>,
    pub total_downtime_minutes: i64,
    pub total_pause_minutes: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PostEfficiency {
    pub post_number: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_minutes: i64,
    pub downtime_minutes: i64,
    pub pause_minutes: i64,
    pub efficiency: i64,
    pub continued: bool,
}

/// Per-machine totals for one calendar day. Lot markers are not machines
/// stopping and are left out; running timers count as active with 0 minutes.
pub fn daily_report(events: &[DowntimeEvent], day: NaiveDate) -> DailyReport {
    let todays: Vec<&DowntimeEvent> = events
        .iter()
        .filter(|e| e.start_time.date() == day && !e.is_marker_machine())
        .collect();

    let machines = machine_totals(todays.iter().copied());
    let (total_downtime_minutes, total_pause_minutes) = split_totals(todays.iter().copied());

    DailyReport {
        day,
        active: todays.iter().filter(|e| e.is_active()).count(),
        machines,
        total_downtime_minutes,
        total_pause_minutes,
    }
}

/// Monday–Sunday week containing `day`.
pub fn weekly_report(events: &[DowntimeEvent], day: NaiveDate) -> WeeklyReport {
    let week_start = day - Duration::days(day.weekday().num_days_from_monday() as i64);
    let week_end = week_start + Duration::days(6);

    let in_week: Vec<&DowntimeEvent> = events
        .iter()
        .filter(|e| {
            let d = e.start_time.date();
            d >= week_start && d <= week_end && !e.is_marker_machine()
        })
        .collect();

    let days = week_start
        .iter_days()
        .take(7)
        .map(|d| {
            let of_day: Vec<&DowntimeEvent> = in_week
                .iter()
                .copied()
                .filter(|e| e.start_time.date() == d)
                .collect();
            let (downtime_minutes, pause_minutes) = split_totals(of_day.iter().copied());

            DayTotals {
                day: d,
                stops: of_day.len(),
                downtime_minutes,
                pause_minutes,
            }
        })
        .collect();

    let (total_downtime_minutes, total_pause_minutes) = split_totals(in_week.iter().copied());

    WeeklyReport {
        week_start,
        week_end,
        days,
        machines: machine_totals(in_week.iter().copied()),
        total_downtime_minutes,
        total_pause_minutes,
    }
}

pub fn post_efficiency(periods: &[ProductionPeriod]) -> Vec<PostEfficiency> {
    periods
        .iter()
        .map(|p| PostEfficiency {
            post_number: p.post_number.clone(),
            start_time: p.start_time,
            end_time: p.end_time,
            duration_minutes: p.duration_minutes,
            downtime_minutes: p.total_downtime_minutes,
            pause_minutes: p.total_pause_minutes,
            efficiency: p.efficiency(),
            continued: p.continued,
        })
        .collect()
}

fn machine_totals<'a, I>(events: I) -> Vec<MachineTotals>
where
    I: IntoIterator<Item = &'a DowntimeEvent>,
{
    let mut by_name: BTreeMap<&str, MachineTotals> = BTreeMap::new();

    for e in events {
        let entry = by_name
            .entry(e.machine_name.as_str())
            .or_insert_with(|| MachineTotals {
                machine: e.machine_name.clone(),
                ..Default::default()
            });

        entry.stops += 1;
        if e.is_active() {
            entry.active += 1;
        } else if e.is_pause() {
            entry.pause_minutes += e.duration_minutes;
        } else {
            entry.downtime_minutes += e.duration_minutes;
        }
    }

    by_name.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::periods::compute_production_periods;
    use crate::models::downtime::MARKER_MACHINE;

    fn ev(machine: &str, start: &str, minutes: Option<i64>) -> DowntimeEvent {
        let start_time = NaiveDateTime::parse_from_str(start, "%Y-%m-%d %H:%M").unwrap();
        DowntimeEvent {
            id: 0,
            machine_id: 1,
            machine_name: machine.to_string(),
            start_time,
            end_time: minutes.map(|m| start_time + Duration::minutes(m)),
            duration_minutes: minutes.unwrap_or(0),
            comment: String::new(),
            post_number: Some("1".to_string()),
            operator_id: "op".to_string(),
            operator_name: "Op".to_string(),
            created_at: String::new(),
        }
    }

    #[test]
    fn daily_report_groups_by_machine() {
        let events = vec![
            ev("Press", "2025-06-04 08:00", Some(10)),
            ev("Press", "2025-06-04 09:00", Some(5)),
            ev("Pause", "2025-06-04 11:00", Some(30)),
            ev("Saw", "2025-06-04 12:00", None),
            ev(MARKER_MACHINE, "2025-06-04 07:00", Some(3)),
            ev("Press", "2025-06-05 08:00", Some(99)),
        ];

        let day = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        let r = daily_report(&events, day);

        assert_eq!(r.machines.len(), 3);
        assert_eq!(r.machines[1].machine, "Press");
        assert_eq!(r.machines[1].stops, 2);
        assert_eq!(r.machines[1].downtime_minutes, 15);
        assert_eq!(r.machines[0].pause_minutes, 30);
        assert_eq!(r.machines[2].active, 1);
        assert_eq!(r.total_downtime_minutes, 15);
        assert_eq!(r.total_pause_minutes, 30);
        assert_eq!(r.active, 1);
    }

    #[test]
    fn weekly_report_covers_monday_to_sunday() {
        let events = vec![
            ev("Press", "2025-06-01 08:00", Some(50)), // previous Sunday
            ev("Press", "2025-06-02 08:00", Some(10)),
            ev("Saw", "2025-06-06 08:00", Some(20)),
            ev("Pause", "2025-06-07 08:00", Some(15)),
        ];

        let r = weekly_report(&events, NaiveDate::from_ymd_opt(2025, 6, 4).unwrap());

        assert_eq!(r.week_start, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        assert_eq!(r.week_end, NaiveDate::from_ymd_opt(2025, 6, 8).unwrap());
        assert_eq!(r.days.len(), 7);
        assert_eq!(r.days[0].downtime_minutes, 10);
        assert_eq!(r.days[4].downtime_minutes, 20);
        assert_eq!(r.days[5].pause_minutes, 15);
        assert_eq!(r.total_downtime_minutes, 30);
        assert_eq!(r.total_pause_minutes, 15);
    }

    #[test]
    fn post_efficiency_uses_regular_downtime_only() {
        let mut m = ev(MARKER_MACHINE, "2025-06-04 07:00", Some(1));
        m.post_number = Some("5".to_string());
        let events = vec![
            m,
            ev("Press", "2025-06-04 08:00", Some(48)),
            ev("Pause", "2025-06-04 09:00", Some(30)),
        ];

        let now = NaiveDateTime::parse_from_str("2025-06-04 15:00", "%Y-%m-%d %H:%M").unwrap();
        let rows = post_efficiency(&compute_production_periods(&events, now));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].duration_minutes, 480);
        assert_eq!(rows[0].efficiency, 90);
        assert_eq!(rows[0].pause_minutes, 30);
    }
}
