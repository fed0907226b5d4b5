//! Environment configuration, validated once at startup.

use std::time::Duration;

use homework_core::{LoopSettings, DEFAULT_RETRY_PERIOD_SECS, DEFAULT_SEEN_ERRORS_CAPACITY};
use homework_engine::{
    PollSettings, Secret, TelegramSettings, DEFAULT_PRACTICUM_ENDPOINT, DEFAULT_TELEGRAM_API_URL,
};
use thiserror::Error;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

const PRACTICUM_ENDPOINT: &str = "PRACTICUM_ENDPOINT";
const TELEGRAM_API_URL: &str = "TELEGRAM_API_URL";
const RETRY_PERIOD: &str = "RETRY_PERIOD";
const REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT";
const SEEN_ERRORS_CAPACITY: &str = "SEEN_ERRORS_CAPACITY";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Added on top of the request timeout to get the per-cycle deadline.
const CYCLE_DEADLINE_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("переменная окружения {name} не задана или пуста")]
    Missing { name: &'static str },
    #[error("переменная окружения {name} должна быть положительным целым числом, получено {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub practicum_token: Secret,
    pub telegram_token: Secret,
    pub chat_id: String,
    pub endpoint: String,
    pub telegram_api_url: String,
    pub retry_period: Duration,
    pub request_timeout: Duration,
    pub seen_errors_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Required credentials are checked first, in a fixed order.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let practicum_token = required(&lookup, PRACTICUM_TOKEN)?;
        let telegram_token = required(&lookup, TELEGRAM_TOKEN)?;
        let chat_id = required(&lookup, TELEGRAM_CHAT_ID)?;

        Ok(Self {
            practicum_token: Secret::new(practicum_token),
            telegram_token: Secret::new(telegram_token),
            chat_id,
            endpoint: optional(&lookup, PRACTICUM_ENDPOINT)
                .unwrap_or_else(|| DEFAULT_PRACTICUM_ENDPOINT.to_string()),
            telegram_api_url: optional(&lookup, TELEGRAM_API_URL)
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            retry_period: Duration::from_secs(positive(
                &lookup,
                RETRY_PERIOD,
                DEFAULT_RETRY_PERIOD_SECS,
            )?),
            request_timeout: Duration::from_secs(positive(
                &lookup,
                REQUEST_TIMEOUT,
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            seen_errors_capacity: positive(
                &lookup,
                SEEN_ERRORS_CAPACITY,
                DEFAULT_SEEN_ERRORS_CAPACITY as u64,
            )? as usize,
        })
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            endpoint: self.endpoint.clone(),
            request_timeout: self.request_timeout,
            ..PollSettings::new(self.practicum_token.clone())
        }
    }

    pub fn telegram_settings(&self) -> TelegramSettings {
        TelegramSettings {
            api_url: self.telegram_api_url.clone(),
            request_timeout: self.request_timeout,
            ..TelegramSettings::new(self.telegram_token.clone(), self.chat_id.clone())
        }
    }

    pub fn loop_settings(&self) -> LoopSettings {
        LoopSettings {
            retry_period_secs: self.retry_period.as_secs(),
            seen_errors_capacity: self.seen_errors_capacity,
        }
    }

    pub fn cycle_deadline(&self) -> Duration {
        self.request_timeout + CYCLE_DEADLINE_GRACE
    }
}

fn optional<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, name).ok_or(ConfigError::Missing { name })
}

fn positive<F>(lookup: &F, name: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = optional(lookup, name) else {
        return Ok(default);
    };
    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::Invalid { name, value: raw }),
    }
}
