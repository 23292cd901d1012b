use std::fs;
use std::path::Path;

use chrono::Weekday;
use tracing::info;

use crate::error::ScheduleLoadError;
use crate::models::calendar_entry::{CalendarEntry, DaySchedule};
use crate::models::query::{WEEKDAYS, day_name};

/// Read-only after load, so it can be shared behind an `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct ScheduleStore {
    entries: Vec<CalendarEntry>,
}

impl ScheduleStore {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScheduleLoadError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ScheduleLoadError::Read {
            path: shown.clone(),
            source,
        })?;
        let store = Self::from_json(&content).map_err(|source| ScheduleLoadError::Parse {
            path: shown.clone(),
            source,
        })?;
        info!(path = %shown, entries = store.len(), "loaded class schedule");
        Ok(store)
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<CalendarEntry> = serde_json::from_str(content)?;
        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(entries: Vec<CalendarEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weekdays that have at least one entry, Monday first.
    pub fn days(&self) -> Vec<Weekday> {
        WEEKDAYS
            .into_iter()
            .filter(|day| self.entries.iter().any(|e| e.is_on(day_name(*day))))
            .collect()
    }

    pub fn entries_for_day(&self, requested: &str) -> DaySchedule {
        let day = canonical_day(requested);
        let matching: Vec<CalendarEntry> = self
            .entries
            .iter()
            .filter(|e| e.is_on(requested))
            .cloned()
            .collect();
        if matching.is_empty() {
            return DaySchedule::NoEvents { day };
        }
        DaySchedule::Entries {
            day,
            entries: matching,
        }
    }

    pub fn entries_for_weekday(&self, weekday: Weekday) -> DaySchedule {
        self.entries_for_day(day_name(weekday))
    }
}

// Recognized weekday names come back in canonical casing; anything else is kept as given.
fn canonical_day(day: &str) -> String {
    WEEKDAYS
        .into_iter()
        .map(day_name)
        .find(|name| name.eq_ignore_ascii_case(day))
        .map(str::to_string)
        .unwrap_or_else(|| day.to_string())
}
