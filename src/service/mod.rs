pub mod assistant;
pub mod date_parser;
pub mod generation_service;
pub mod prompt;
pub mod query_interpreter;
pub mod response_composer;
pub mod schedule_store;
