use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use std::collections::BTreeMap;

/// Daily production window, local wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductionWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ProductionWindow {
    fn new(start: (u32, u32), end: (u32, u32)) -> Self {
        Self {
            start: hm(start.0, start.1),
            end: hm(end.0, end.1),
        }
    }

    /// Absolute bounds of the window on `day`.
    pub fn bounds(&self, day: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        (day.and_time(self.start), day.and_time(self.end))
    }

    pub fn label(&self) -> String {
        format!(
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Production window per weekday (`None` = no production).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionSchedule {
    days: [Option<ProductionWindow>; 7], // Monday first
}

impl Default for ProductionSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

impl ProductionSchedule {
    /// Site schedule: Mon–Thu and Sat 06:00–23:20, Fri 06:00–14:00, Sun closed.
    pub fn standard() -> Self {
        let long = Some(ProductionWindow::new((6, 0), (23, 20)));
        let friday = Some(ProductionWindow::new((6, 0), (14, 0)));

        Self {
            days: [long, long, long, long, friday, long, None],
        }
    }

    pub fn window_for(&self, day: NaiveDate) -> Option<ProductionWindow> {
        self.days[day.weekday().num_days_from_monday() as usize]
    }

    /// Apply config overrides of the form `friday: "06:00-14:00"` or `sunday: "off"`.
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> AppResult<Self> {
        for (day, raw) in overrides {
            let weekday: Weekday = day
                .parse()
                .map_err(|_| AppError::Config(format!("Unknown weekday in schedule: {day}")))?;

            let idx = weekday.num_days_from_monday() as usize;
            self.days[idx] = parse_window(raw)?;
        }
        Ok(self)
    }
}

fn parse_window(raw: &str) -> AppResult<Option<ProductionWindow>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("off") || raw.is_empty() {
        return Ok(None);
    }

    let (start_raw, end_raw) = raw
        .split_once('-')
        .ok_or_else(|| AppError::Config(format!("Invalid window '{raw}', expected HH:MM-HH:MM")))?;

    let start = NaiveTime::parse_from_str(start_raw.trim(), "%H:%M")
        .map_err(|_| AppError::InvalidTime(start_raw.to_string()))?;
    let end = NaiveTime::parse_from_str(end_raw.trim(), "%H:%M")
        .map_err(|_| AppError::InvalidTime(end_raw.to_string()))?;

    if end <= start {
        return Err(AppError::Config(format!(
            "Invalid window '{raw}': end must be later than start"
        )));
    }

    Ok(Some(ProductionWindow { start, end }))
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn standard_schedule_per_weekday() {
        let s = ProductionSchedule::standard();

        // 2025-06-02 is a Monday
        assert_eq!(s.window_for(d("2025-06-02")).unwrap().label(), "06:00-23:20");
        assert_eq!(s.window_for(d("2025-06-05")).unwrap().label(), "06:00-23:20");
        assert_eq!(s.window_for(d("2025-06-06")).unwrap().label(), "06:00-14:00");
        assert_eq!(s.window_for(d("2025-06-07")).unwrap().label(), "06:00-23:20");
        assert!(s.window_for(d("2025-06-08")).is_none());
    }

    #[test]
    fn overrides_replace_single_days() {
        let mut o = BTreeMap::new();
        o.insert("saturday".to_string(), "off".to_string());
        o.insert("Fri".to_string(), "07:00-15:30".to_string());

        let s = ProductionSchedule::standard().with_overrides(&o).unwrap();

        assert!(s.window_for(d("2025-06-07")).is_none());
        assert_eq!(s.window_for(d("2025-06-06")).unwrap().label(), "07:00-15:30");
        assert_eq!(s.window_for(d("2025-06-02")).unwrap().label(), "06:00-23:20");
    }

    #[test]
    fn rejects_bad_overrides() {
        let mut o = BTreeMap::new();
        o.insert("funday".to_string(), "06:00-14:00".to_string());
        assert!(ProductionSchedule::standard().with_overrides(&o).is_err());

        let mut o = BTreeMap::new();
        o.insert("monday".to_string(), "14:00-06:00".to_string());
        assert!(ProductionSchedule::standard().with_overrides(&o).is_err());
    }
}
