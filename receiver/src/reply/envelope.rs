//! Delivery body envelope: `{"event", "data", "ts", "session"}`.

use serde::Deserialize;
use serde_json::Value;

/// JSON envelope wrapping every delivery.
///
/// Parsed leniently and only after the signature has verified over the
/// raw bytes; a body that fails to parse yields an empty envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub ts: Value,
    #[serde(default)]
    pub session: Value,
}

impl Envelope {
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// `data.text`, trimmed and lowercased.
    pub fn text_command(&self) -> Option<String> {
        self.data
            .get("text")
            .and_then(Value::as_str)
            .map(|t| t.trim().to_lowercase())
    }

    /// `data.sender.chatId`, the chat a reply should go to.
    pub fn sender_chat(&self) -> Option<&str> {
        self.data
            .get("sender")
            .and_then(|s| s.get("chatId"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// `data.message.key`, identifying the received message.
    pub fn message_key(&self) -> Option<&Value> {
        self.data
            .get("message")
            .and_then(|m| m.get("key"))
            .filter(|k| !k.is_null())
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.get("id").and_then(Value::as_str)
    }
}
