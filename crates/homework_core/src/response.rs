use serde_json::Value;
use thiserror::Error;

pub const HOMEWORKS_FIELD: &str = "homeworks";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("ответ API не является словарём")]
    NotAMapping,
    #[error("в ответе API нет ключа homeworks")]
    MissingHomeworks,
    #[error("ключ homeworks в ответе API не является списком")]
    HomeworksNotAList,
}

/// Validates the decoded API payload and returns its homework records in received order.
pub fn check_response(response: &Value) -> Result<&[Value], ShapeError> {
    let object = response.as_object().ok_or(ShapeError::NotAMapping)?;
    let homeworks = object
        .get(HOMEWORKS_FIELD)
        .ok_or(ShapeError::MissingHomeworks)?;
    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or(ShapeError::HomeworksNotAList)
}
