use std::fmt;
use std::sync::Arc;

use engine_logging::{engine_debug, engine_error};
use homework_core::DeliveryError;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{ClientError, TelegramSettings};

/// Telegram rejects messages longer than this many characters.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Chat transport used by the dispatcher.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError>;
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Bot API client posting to `sendMessage`.
#[derive(Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_url: String,
    /// Embeds the bot token.
    send_url: Url,
}

impl fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl TelegramNotifier {
    pub fn new(settings: &TelegramSettings) -> Result<Self, ClientError> {
        let raw = format!(
            "{}/bot{}/sendMessage",
            settings.api_url.trim_end_matches('/'),
            settings.token.expose()
        );
        // The url embeds the token; report only the configured base.
        let send_url = Url::parse(&raw).map_err(|err| ClientError::InvalidUrl {
            url: settings.api_url.clone(),
            message: err.to_string(),
        })?;
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClientError::Build(err.to_string()))?;
        Ok(Self {
            client,
            api_url: settings.api_url.clone(),
            send_url,
        })
    }

    async fn send_chunk(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(self.send_url.clone())
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            .map_err(|err| DeliveryError::Transport(err.without_url().to_string()))?;

        let status = response.status();
        let body: Option<BotApiResponse> = response.json().await.ok();
        match body {
            Some(BotApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(BotApiResponse {
                description: Some(description),
                ..
            }) => Err(DeliveryError::Rejected { description }),
            _ if !status.is_success() => Err(DeliveryError::HttpStatus(status.as_u16())),
            _ => Err(DeliveryError::Rejected {
                description: "sendMessage failed".to_string(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        for chunk in split_message(text) {
            self.send_chunk(chat_id, &chunk).await?;
        }
        Ok(())
    }
}

fn split_message(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(TELEGRAM_MESSAGE_LIMIT)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Sends to the one configured chat and logs the outcome.
#[derive(Clone)]
pub struct Dispatcher {
    notifier: Arc<dyn Notifier>,
    chat_id: String,
}

impl Dispatcher {
    pub fn new(notifier: Arc<dyn Notifier>, chat_id: impl Into<String>) -> Self {
        Self {
            notifier,
            chat_id: chat_id.into(),
        }
    }

    /// Exactly one delivery attempt. The error is returned for bookkeeping only.
    pub async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        match self.notifier.send_message(&self.chat_id, text).await {
            Ok(()) => {
                engine_debug!("Message sent to chat, chars={}", text.chars().count());
                Ok(())
            }
            Err(err) => {
                engine_error!("Failed to send message: {}", err);
                Err(err)
            }
        }
    }
}
