use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};
use serde::Serialize;

use crate::errors::ScheduleError;

const DAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const DAY_LABELS: [&str; 7] = [
    "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi", "Dimanche",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl DayHours {
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.open && time <= self.close
    }
}

/// Opening hours indexed by weekday, Monday first. A `None` day is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyHours {
    days: [Option<DayHours>; 7],
}

impl Default for WeeklyHours {
    fn default() -> Self {
        let mut map = BTreeMap::new();
        for day in &DAY_NAMES[..5] {
            map.insert(day.to_string(), "08:00-20:00".to_string());
        }
        map.insert("saturday".to_string(), "09:00-18:00".to_string());
        map.insert("sunday".to_string(), "10:00-17:00".to_string());
        // Every entry above is a valid literal.
        Self::from_map(&map).unwrap_or_else(|_| Self::closed())
    }
}

impl WeeklyHours {
    pub fn closed() -> Self {
        Self { days: [None; 7] }
    }

    /// Parses `{"monday": "08:00-20:00", ...}`. Days may be omitted.
    pub fn from_json(s: &str) -> Result<Self, ScheduleError> {
        let map: BTreeMap<String, String> =
            serde_json::from_str(s).map_err(|e| ScheduleError::Json(e.to_string()))?;
        Self::from_map(&map)
    }

    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, ScheduleError> {
        let mut days = [None; 7];
        for (day, range) in map {
            let idx = parse_weekday(day)?;
            days[idx] = Some(parse_range(range)?);
        }
        Ok(Self { days })
    }

    pub fn with_day(mut self, day: Weekday, hours: DayHours) -> Self {
        self.days[day.num_days_from_monday() as usize] = Some(hours);
        self
    }

    pub fn hours_for(&self, day: Weekday) -> Option<&DayHours> {
        self.days[day.num_days_from_monday() as usize].as_ref()
    }

    pub fn to_human_readable(&self) -> String {
        self.days
            .iter()
            .enumerate()
            .filter_map(|(i, d)| {
                d.map(|h| {
                    format!(
                        "{}: {}-{}",
                        DAY_LABELS[i],
                        h.open.format("%H:%M"),
                        h.close.format("%H:%M")
                    )
                })
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn parse_weekday(s: &str) -> Result<usize, ScheduleError> {
    let lower = s.to_lowercase();
    DAY_NAMES
        .iter()
        .position(|d| *d == lower || d[..3] == lower)
        .ok_or_else(|| ScheduleError::Weekday(s.to_string()))
}

fn parse_range(s: &str) -> Result<DayHours, ScheduleError> {
    let (open, close) = s
        .split_once('-')
        .ok_or_else(|| ScheduleError::Range(s.to_string()))?;
    let open = parse_time(open.trim())?;
    let close = parse_time(close.trim())?;
    if close < open {
        return Err(ScheduleError::Range(s.to_string()));
    }
    Ok(DayHours { open, close })
}

fn parse_time(s: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| ScheduleError::Time(s.to_string()))
}

/// Whether `now` falls inside the opening hours of its weekday, both ends
/// inclusive.
pub fn is_business_open(now: &NaiveDateTime, schedule: &WeeklyHours) -> bool {
    schedule
        .hours_for(now.weekday())
        .map(|h| h.contains(now.time()))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BusinessStatus {
    pub open: bool,
    pub message: &'static str,
    pub response_time: &'static str,
}

pub fn business_status(now: &NaiveDateTime, schedule: &WeeklyHours) -> BusinessStatus {
    if is_business_open(now, schedule) {
        BusinessStatus {
            open: true,
            message: "🟢 Nous sommes actuellement disponibles",
            response_time: "Réponse sous 5-10 minutes",
        }
    } else {
        BusinessStatus {
            open: false,
            message: "🟡 Nous sommes actuellement fermés",
            response_time: "Réponse le prochain jour ouvrable",
        }
    }
}
