//! Handler for Telegram webhook deliveries.

use axum::{Json, extract::State};
use tracing::debug;

use crate::api::dto::update::{Update, WebhookAck};
use crate::state::AppState;

/// Processes one Telegram update.
///
/// # Endpoint
///
/// `POST /webhook`
///
/// The update is handled to completion before answering. Every accepted
/// update gets `200 {"ok":true}`, including updates without a message, so
/// Telegram never redelivers them. Reply and persistence failures are
/// logged by the services and do not change the response.
pub async fn webhook_handler(
    State(state): State<AppState>,
    Json(update): Json<Update>,
) -> Json<WebhookAck> {
    match update.message {
        Some(message) => {
            state.update_service.handle_message(&message).await;
        }
        None => {
            debug!(update_id = update.update_id, "Ignoring update without message");
        }
    }

    Json(WebhookAck { ok: true })
}
