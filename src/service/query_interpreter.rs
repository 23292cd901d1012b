use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use tracing::debug;

use crate::models::query::{InterpretedQuery, Resolution, WEEKDAYS, day_name};
use crate::service::date_parser::try_parse_date;
use crate::service::schedule_store::ScheduleStore;

/// First weekday in Monday..Sunday order whose name appears anywhere in
/// `text`, regardless of where in the text it appears.
pub fn canonical_weekday_in(text: &str) -> Option<Weekday> {
    let lower = text.to_lowercase();
    WEEKDAYS
        .into_iter()
        .find(|day| lower.contains(&day_name(*day).to_lowercase()))
}

/// Resolves the day a question is about: an explicit month/day date wins,
/// then a weekday name, then `today`.
pub fn interpret(text: &str, store: &ScheduleStore, today: NaiveDate) -> InterpretedQuery {
    let (resolved_day, resolved_date, resolution) =
        if let Some(date) = try_parse_date(text, today) {
            (date.weekday(), Some(date), Resolution::ExplicitDate)
        } else if let Some(day) = canonical_weekday_in(text) {
            (day, None, Resolution::WeekdayName)
        } else {
            (today.weekday(), Some(today), Resolution::Today)
        };
    debug!(
        day = day_name(resolved_day),
        date = ?resolved_date,
        resolution = ?resolution,
        "interpreted question"
    );

    InterpretedQuery {
        resolved_day,
        resolved_date,
        matching_entries: store.entries_for_weekday(resolved_day),
        resolution,
    }
}

/// Interprets questions against the wall clock in a fixed time zone.
#[derive(Debug, Clone)]
pub struct QueryInterpreter {
    timezone: Tz,
}

impl QueryInterpreter {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn today_at(&self, now: DateTime<Utc>) -> NaiveDate {
        self.timezone.from_utc_datetime(&now.naive_utc()).date_naive()
    }

    pub fn interpret_at(
        &self,
        text: &str,
        store: &ScheduleStore,
        now: DateTime<Utc>,
    ) -> InterpretedQuery {
        interpret(text, store, self.today_at(now))
    }
}

impl Default for QueryInterpreter {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}
