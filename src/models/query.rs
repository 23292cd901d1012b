use chrono::{NaiveDate, Weekday};

use crate::models::calendar_entry::DaySchedule;

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Which rule picked the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    ExplicitDate,
    WeekdayName,
    Today,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretedQuery {
    pub resolved_day: Weekday,
    pub resolved_date: Option<NaiveDate>,
    pub matching_entries: DaySchedule,
    pub resolution: Resolution,
}

impl InterpretedQuery {
    pub fn day_name(&self) -> &'static str {
        day_name(self.resolved_day)
    }

    /// `July 13, 2025`, or empty when no date was resolved.
    pub fn full_date_text(&self) -> String {
        self.resolved_date
            .map(|d| d.format("%B %d, %Y").to_string())
            .unwrap_or_default()
    }

    pub fn headline(&self) -> String {
        match self.resolved_date {
            Some(_) => self.full_date_text(),
            None => self.day_name().to_string(),
        }
    }
}
