//! Reply generation for verified deliveries.
//!
//! A receiver may answer a delivery with actions for the sender to run
//! (send a text, react to a message, ...). Only a handful of demo commands
//! are recognised; everything else is acknowledged with no actions.

pub mod envelope;

use serde::Serialize;
use serde_json::Value;

pub use envelope::Envelope;

/// Event name of the sender's reachability probe.
pub const PREFLIGHT_EVENT: &str = "preflight";

/// Event name for an inbound chat message.
pub const MESSAGE_RECEIVED_EVENT: &str = "message_received";

/// Delay the sender should leave between actions, in milliseconds.
pub const ACTION_DELAY_MS: u64 = 600;

/// Action the sender performs on the receiver's behalf.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplyAction {
    Send(SendAction),
    Control(ControlAction),
}

/// Outgoing message, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SendAction {
    Text { to: String, text: String },
}

/// Non-message action, tagged by `act`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "act", rename_all = "lowercase")]
pub enum ControlAction {
    React { to: String, key: Value, emoji: String },
    Read { key: Value },
}

/// Response body for an accepted delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookReply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pong: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ReplyAction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
}

impl WebhookReply {
    pub fn pong() -> Self {
        Self {
            ok: true,
            pong: Some(true),
            actions: None,
            delay_ms: None,
        }
    }

    pub fn with_actions(actions: Vec<ReplyAction>) -> Self {
        Self {
            ok: true,
            pong: None,
            actions: Some(actions),
            delay_ms: Some(ACTION_DELAY_MS),
        }
    }
}

/// Build the reply for a verified delivery of `event`.
pub fn build_reply(event: &str, envelope: &Envelope) -> WebhookReply {
    match event {
        PREFLIGHT_EVENT => WebhookReply::pong(),
        MESSAGE_RECEIVED_EVENT => WebhookReply::with_actions(message_actions(envelope)),
        _ => WebhookReply::with_actions(Vec::new()),
    }
}

fn message_actions(envelope: &Envelope) -> Vec<ReplyAction> {
    let to = match envelope.sender_chat() {
        Some(to) => to.to_string(),
        None => return Vec::new(),
    };
    let command = envelope.text_command().unwrap_or_default();
    let key = envelope.message_key().cloned();

    match (command.as_str(), key) {
        ("test", _) => vec![ReplyAction::Send(SendAction::Text {
            to,
            text: "pong".to_string(),
        })],
        ("react", Some(key)) => vec![ReplyAction::Control(ControlAction::React {
            to,
            key,
            emoji: "\u{1F44D}".to_string(),
        })],
        ("read", Some(key)) => vec![ReplyAction::Control(ControlAction::Read { key })],
        _ => Vec::new(),
    }
}
