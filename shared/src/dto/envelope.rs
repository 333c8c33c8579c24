use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Response wrapper returned by every flight endpoint.
///
/// `message` is free-form: the API sends a plain string, an object with a `message`
/// field, or an array of validation problems depending on the failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    pub status: bool,
    pub timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Server message rendered as text, if the envelope carries one.
    pub fn message_text(&self) -> Option<String> {
        self.message.as_ref().map(describe_message)
    }

    /// Unwrap the payload, turning `status: false` or a missing `data` into the error text.
    pub fn into_data(self) -> Result<T, String> {
        if !self.status {
            return Err(self
                .message_text()
                .unwrap_or_else(|| "Request was not successful".to_string()));
        }
        self.data
            .ok_or_else(|| "Response did not contain any data".to_string())
    }
}

/// Body of a non-2xx response. Only the message is of interest.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    pub message: Option<Value>,
}

/// Render a server-provided message value as a single line of text.
pub fn describe_message(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(map) => match map.get("message") {
            Some(inner) => describe_message(inner),
            None => value.to_string(),
        },
        Value::Array(items) => items
            .iter()
            .map(describe_message)
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

/// Treat an explicit `null` the same as a missing field.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
