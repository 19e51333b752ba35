//! Course discussion rooms: message body rules and history size.

use crate::error::CoreError;

/// How many messages a room's history returns.
pub const MESSAGE_HISTORY_LIMIT: i64 = 50;

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON";
pub const EMPTY_MESSAGE: &str = "Message content cannot be empty";

/// Decode a raw post body `{"message": "..."}` into the message text.
///
/// The text is kept as sent; it only has to contain something other than
/// whitespace. A missing or non-string `message` counts as empty.
pub fn parse_message_body(body: &[u8]) -> Result<String, CoreError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|_| CoreError::Validation(INVALID_JSON_MESSAGE.into()))?;

    match value.get("message").and_then(serde_json::Value::as_str) {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => Err(CoreError::Validation(EMPTY_MESSAGE.into())),
    }
}
