use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_PRACTICUM_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Current time in seconds since the epoch.
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(|| chrono::Utc::now().timestamp())
}

/// Credential whose `Debug` output never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

#[derive(Debug, Clone)]
pub struct PollSettings {
    pub endpoint: String,
    pub token: Secret,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl PollSettings {
    pub fn new(token: Secret) -> Self {
        Self {
            endpoint: DEFAULT_PRACTICUM_ENDPOINT.to_string(),
            token,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelegramSettings {
    pub api_url: String,
    pub token: Secret,
    pub chat_id: String,
    pub request_timeout: Duration,
}

impl TelegramSettings {
    pub fn new(token: Secret, chat_id: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
            token,
            chat_id: chat_id.into(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Failure to construct an HTTP client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid url {url}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("failed to build http client: {0}")]
    Build(String),
}
