pub mod cart;
pub mod menus;
pub mod orders;
pub mod reviews;
pub mod stats;
pub mod users;

use serde::{Deserialize, Deserializer, de};

use crate::error::{AppError, AppResult};

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrText {
    Int(i64),
    Text(String),
}

/// Accept an integer either as a JSON number or a numeric string such as `"7"`.
/// Anything else fails deserialization and surfaces as a 400.
pub(crate) fn lenient_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IntOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IntOrText::Int(n)) => i32::try_from(n)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("number {n} is out of range"))),
        Some(IntOrText::Text(text)) => text
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected a number, got {text:?}"))),
    }
}

/// Require a positive id, distinguishing "missing" from "malformed".
pub(crate) fn require_id(value: Option<i32>, missing: &str, invalid: &str) -> AppResult<i32> {
    match value {
        None => Err(AppError::validation(missing)),
        Some(id) if id <= 0 => Err(AppError::validation(invalid)),
        Some(id) => Ok(id),
    }
}

/// Require a non-blank string field, returning it trimmed.
pub(crate) fn require_text(value: Option<&str>, message: &str) -> AppResult<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(AppError::validation(message)),
    }
}
