pub mod calendar_entry;
pub mod query;
