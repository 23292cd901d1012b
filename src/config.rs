use std::collections::HashMap;
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::time::Duration;

use chrono_tz::Tz;

use crate::error::ConfigError;

const DEFAULT_SCHEDULE_FILE: &str = "calendar_data.json";
const DEFAULT_MODEL: &str = "llama3";
const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Raw `KEY=VALUE` pairs from an optional config file.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::Syntax {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// Config file first, then the process environment.
    pub fn get_prop(&self, key: &str) -> Option<String> {
        self.get(key).or_else(|| env::var(key).ok())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Cli,
    Api,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub schedule_file: String,
    pub model: String,
    pub prompt_template_file: Option<String>,
    pub ollama_host: String,
    pub generation_timeout: Duration,
    pub timezone: Tz,
    pub run_mode: RunMode,
    pub bind_addr: SocketAddr,
}

impl Settings {
    pub fn from_props<F>(get_prop: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match get_prop("GENERATION_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid("GENERATION_TIMEOUT_SECS", &raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let timezone = match get_prop("TIMEZONE") {
            Some(raw) => raw.trim().parse::<Tz>().map_err(|_| invalid("TIMEZONE", &raw))?,
            None => Tz::UTC,
        };

        let run_mode = match get_prop("RUN_MODE").as_deref().map(str::trim) {
            None | Some("cli") => RunMode::Cli,
            Some("api") => RunMode::Api,
            Some(other) => return Err(invalid("RUN_MODE", other)),
        };

        let bind_raw = get_prop("BIND_ADDR").unwrap_or(DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| invalid("BIND_ADDR", &bind_raw))?;

        Ok(Self {
            schedule_file: get_prop("SCHEDULE_FILE").unwrap_or(DEFAULT_SCHEDULE_FILE.to_string()),
            model: get_prop("OLLAMA_MODEL").unwrap_or(DEFAULT_MODEL.to_string()),
            prompt_template_file: get_prop("PROMPT_TEMPLATE_FILE").filter(|p| !p.trim().is_empty()),
            ollama_host: get_prop("OLLAMA_HOST").unwrap_or(DEFAULT_OLLAMA_HOST.to_string()),
            generation_timeout: Duration::from_secs(timeout_secs),
            timezone,
            run_mode,
            bind_addr,
        })
    }

    /// Reads `CONFIG_FILE` when set, falling back to the environment per key.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match env::var("CONFIG_FILE") {
            Ok(path) => AppConfig::from_file(&path)?,
            Err(_) => AppConfig::default(),
        };
        Self::from_props(|key| config.get_prop(key))
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
