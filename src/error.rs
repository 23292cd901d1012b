use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config line {line}: {content}")]
    Syntax { line: usize, content: String },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Error)]
pub enum ScheduleLoadError {
    #[error("unable to read schedule {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed schedule {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Internal to the explicit-date tier; callers only ever see `None`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateParseError {
    #[error("unknown month name: {0}")]
    UnknownMonth(String),

    #[error("invalid day number: {0}")]
    InvalidDay(String),

    #[error("{month} {day} is not a calendar date in {year}")]
    OutOfRange { year: i32, month: u32, day: u32 },
}

#[derive(Debug, Error)]
pub enum GenerationServiceError {
    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unable to decode generation response: {source}\nRaw body: {body}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("prompt rendering failed: {0}")]
    Template(#[from] TemplateError),

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("invalid prompt template: {0}")]
    Invalid(#[from] Box<handlebars::TemplateError>),

    #[error("unable to render prompt: {0}")]
    Render(#[from] Box<handlebars::RenderError>),

    #[error("unable to read prompt template {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Please enter a question.")]
    EmptyQuestion,

    #[error(transparent)]
    Generation(#[from] GenerationServiceError),
}
