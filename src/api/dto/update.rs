//! Telegram `Update` payload received on the webhook.

use serde::Deserialize;

use crate::domain::entities::IncomingMessage;

/// An incoming update. Only plain messages are acted upon; every other
/// update kind deserializes with `message: None`.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
}

/// Body returned to Telegram for every accepted update.
#[derive(Debug, serde::Serialize)]
pub struct WebhookAck {
    pub ok: bool,
}
