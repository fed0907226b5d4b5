use thiserror::Error;

use crate::{FormatError, ShapeError};

/// Prefix of every error notification sent to the chat.
pub const ERROR_NOTIFICATION_PREFIX: &str = "Сбой в работе программы";

/// Recoverable failure that ends the current cycle early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error("запрос к API не выполнен: {0}")]
    Transport(String),
    #[error("API не ответил за {0} с")]
    Timeout(u64),
    #[error("эндпоинт недоступен, код ответа API: {0}")]
    HttpStatus(u16),
    #[error("ответ API не является JSON: {0}")]
    Decode(String),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error("в записи о работе нет ключа {0}")]
    MissingField(&'static str),
    #[error("неизвестный статус работы: {0}")]
    UnknownStatus(String),
}

impl From<FormatError> for CycleError {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::MissingField(field) => CycleError::MissingField(field),
            FormatError::UnknownStatus(status) => CycleError::UnknownStatus(status),
        }
    }
}

impl CycleError {
    /// Chat text for this failure; also the deduplication key.
    pub fn notification_text(&self) -> String {
        format!("{ERROR_NOTIFICATION_PREFIX}: {self}")
    }
}

/// Best-effort delivery failure. Logged, never escalated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("сообщение не отправлено: {0}")]
    Transport(String),
    #[error("Bot API вернул код {0}")]
    HttpStatus(u16),
    #[error("Bot API отклонил сообщение: {description}")]
    Rejected { description: String },
}
