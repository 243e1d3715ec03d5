//! Bot command handling: help, request history and broadcasts.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;
use tracing::{info, warn};

use crate::domain::entities::Command;
use crate::domain::repositories::{RequestRepository, UserRepository};
use crate::error::AppError;
use crate::infrastructure::pacer::Pacer;
use crate::infrastructure::telegram::{ChatTransport, ReplyFormat, TransportError};
use crate::utils::formatting::format_requests;

pub const WELCOME_REPLY: &str = "Welcome!\nSend me an Amazon link and I'll send you the referral version, if the region is supported.";
pub const FAILURE_REPLY: &str = "Unable to handle this command 😫";
pub const BROADCAST_DONE_REPLY: &str = "Completed!";
pub const NO_REQUESTS_REPLY: &str = "No requests in the last 7 days";

/// How far back `/list` looks.
const LIST_WINDOW_DAYS: i64 = 7;

/// Executes bot commands and produces the reply text.
pub struct CommandService {
    users: Arc<dyn UserRepository>,
    requests: Arc<dyn RequestRepository>,
    transport: Arc<dyn ChatTransport>,
    pacer: Arc<dyn Pacer>,
}

impl CommandService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        requests: Arc<dyn RequestRepository>,
        transport: Arc<dyn ChatTransport>,
        pacer: Arc<dyn Pacer>,
    ) -> Self {
        Self {
            users,
            requests,
            transport,
            pacer,
        }
    }

    /// Runs a command on behalf of `sender_id` and returns the reply.
    ///
    /// Errors are logged and masked behind a generic reply.
    pub async fn handle(&self, command: &Command, sender_id: Option<i64>) -> String {
        let result = match command.name.as_str() {
            "start" | "help" => Ok(WELCOME_REPLY.to_string()),
            "list" => self.list_recent_requests(sender_id).await,
            "broadcast" => self.broadcast(sender_id, &command.arguments).await,
            other => Err(AppError::not_found(
                "Unknown command",
                json!({ "command": other }),
            )),
        };

        result.unwrap_or_else(|e| {
            warn!(
                command = %command.name,
                user_id = ?sender_id,
                "Command failed: {}",
                e
            );
            FAILURE_REPLY.to_string()
        })
    }

    /// Ensures the sender is a known admin.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for anonymous senders and non-admins.
    async fn authorize(&self, sender_id: Option<i64>) -> Result<i64, AppError> {
        let user_id = sender_id.ok_or_else(|| {
            AppError::unauthorized("Anonymous sender", json!({}))
        })?;

        if !self.users.is_admin(user_id).await? {
            return Err(AppError::unauthorized(
                "User is not authorized to perform this action",
                json!({ "user_id": user_id }),
            ));
        }

        Ok(user_id)
    }

    async fn list_recent_requests(&self, sender_id: Option<i64>) -> Result<String, AppError> {
        self.authorize(sender_id).await?;

        let since = Utc::now() - Duration::days(LIST_WINDOW_DAYS);
        let requests = self.requests.list_since(since).await?;

        if requests.is_empty() {
            return Ok(NO_REQUESTS_REPLY.to_string());
        }

        Ok(format_requests(&requests))
    }

    /// Sends `text` to every reachable user, one paced send at a time.
    ///
    /// Users answering with `Forbidden` are marked as having blocked the bot.
    async fn broadcast(&self, sender_id: Option<i64>, text: &str) -> Result<String, AppError> {
        let admin_id = self.authorize(sender_id).await?;

        if text.trim().is_empty() {
            return Err(AppError::bad_request("Broadcast text is empty", json!({})));
        }

        let users = self.users.list_reachable().await?;
        let mut delivered = 0usize;
        let mut blocked = 0usize;

        for user in &users {
            self.pacer.ready().await;

            match self
                .transport
                .send_message(user.telegram_id, text, ReplyFormat::Plain)
                .await
            {
                Ok(()) => {
                    delivered += 1;
                    metrics::counter!("refbot_broadcast_sent_total").increment(1);
                }
                Err(TransportError::Forbidden(reason)) => {
                    blocked += 1;
                    metrics::counter!("refbot_broadcast_blocked_total").increment(1);
                    info!(user_id = user.telegram_id, %reason, "User blocked the bot");
                    if let Err(e) = self.users.set_blocked(user.telegram_id, true).await {
                        warn!(user_id = user.telegram_id, "Failed to mark user as blocked: {}", e);
                    }
                }
                Err(e) => {
                    warn!(user_id = user.telegram_id, "Broadcast delivery failed: {}", e);
                }
            }
        }

        info!(
            admin_id,
            recipients = users.len(),
            delivered,
            blocked,
            "Broadcast completed"
        );

        Ok(BROADCAST_DONE_REPLY.to_string())
    }
}
