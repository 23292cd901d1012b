use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the static class schedule.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub day: String,
    pub subject: String,
    pub start_time: String,
    pub end_time: String,
    pub room: String,
}

impl CalendarEntry {
    pub fn is_on(&self, day_name: &str) -> bool {
        self.day.to_lowercase() == day_name.to_lowercase()
    }
}

impl fmt::Display for CalendarEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- **{}** from *{}* to *{}* in `{}`",
            self.subject, self.start_time, self.end_time, self.room
        )
    }
}

/// Entries for a single day. An empty lookup is `NoEvents` so callers
/// always have something to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaySchedule {
    Entries {
        day: String,
        entries: Vec<CalendarEntry>,
    },
    NoEvents {
        day: String,
    },
}

impl DaySchedule {
    pub fn day(&self) -> &str {
        match self {
            DaySchedule::Entries { day, .. } | DaySchedule::NoEvents { day } => day,
        }
    }

    pub fn entries(&self) -> &[CalendarEntry] {
        match self {
            DaySchedule::Entries { entries, .. } => entries,
            DaySchedule::NoEvents { .. } => &[],
        }
    }
}

impl fmt::Display for DaySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaySchedule::NoEvents { day } => write!(f, "No subjects scheduled for {}.", day),
            DaySchedule::Entries { entries, .. } => {
                let lines: Vec<String> = entries.iter().map(|e| e.to_string()).collect();
                write!(f, "{}", lines.join("\n"))
            }
        }
    }
}
