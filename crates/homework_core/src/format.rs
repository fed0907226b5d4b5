use serde_json::Value;
use thiserror::Error;

use crate::HomeworkStatus;

pub const HOMEWORK_NAME_FIELD: &str = "homework_name";
pub const STATUS_FIELD: &str = "status";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("в записи о работе нет ключа {0}")]
    MissingField(&'static str),
    #[error("неизвестный статус работы: {0}")]
    UnknownStatus(String),
}

/// One homework record that passed formatting checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub homework_name: String,
    pub status: HomeworkStatus,
}

impl StatusUpdate {
    pub fn message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.homework_name,
            self.status.verdict()
        )
    }
}

/// Extracts name and status from a raw record.
///
/// The name must be a JSON string. A missing status is reported as an unknown
/// status, the same as an unrecognized one.
pub fn parse_status(homework: &Value) -> Result<StatusUpdate, FormatError> {
    let homework_name = homework
        .get(HOMEWORK_NAME_FIELD)
        .and_then(Value::as_str)
        .ok_or(FormatError::MissingField(HOMEWORK_NAME_FIELD))?;
    let status = match homework.get(STATUS_FIELD) {
        Some(Value::String(raw)) => {
            HomeworkStatus::parse(raw).ok_or_else(|| FormatError::UnknownStatus(raw.clone()))?
        }
        Some(other) => return Err(FormatError::UnknownStatus(other.to_string())),
        None => return Err(FormatError::UnknownStatus("<нет статуса>".to_string())),
    };
    Ok(StatusUpdate {
        homework_name: homework_name.to_string(),
        status,
    })
}

pub fn format_status(homework: &Value) -> Result<String, FormatError> {
    parse_status(homework).map(|update| update.message())
}
