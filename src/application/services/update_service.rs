//! Per-message handling: commands, link conversion and the reply.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::services::command_service::CommandService;
use crate::application::services::pipeline_service::{Diagnostic, PipelineService};
use crate::domain::entities::{IncomingMessage, NewLinkRequest};
use crate::domain::repositories::{RequestRepository, UserRepository};
use crate::infrastructure::telegram::{ChatTransport, ReplyFormat};
use crate::utils::formatting::format_links;
use crate::utils::url_extractor::extract_urls;

/// What happened to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// A command was executed.
    Command(String),
    /// Links were converted; holds the number of short URLs sent back.
    Converted(usize),
    /// Nothing was converted.
    Rejected(Diagnostic),
}

impl UpdateOutcome {
    fn label(&self) -> &'static str {
        match self {
            Self::Command(_) => "command",
            Self::Converted(_) => "converted",
            Self::Rejected(diagnostic) => diagnostic.label(),
        }
    }
}

pub struct UpdateService {
    pipeline: Arc<PipelineService>,
    commands: Arc<CommandService>,
    users: Arc<dyn UserRepository>,
    requests: Arc<dyn RequestRepository>,
    transport: Arc<dyn ChatTransport>,
}

impl UpdateService {
    pub fn new(
        pipeline: Arc<PipelineService>,
        commands: Arc<CommandService>,
        users: Arc<dyn UserRepository>,
        requests: Arc<dyn RequestRepository>,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        Self {
            pipeline,
            commands,
            users,
            requests,
            transport,
        }
    }

    /// Handles one incoming message and sends the reply to its chat.
    ///
    /// Delivery and persistence failures are logged; the message is always
    /// considered handled.
    pub async fn handle_message(&self, message: &IncomingMessage) -> UpdateOutcome {
        let chat_id = message.chat.id;
        let sender_id = message.sender_id();

        if let Err(e) = self.transport.send_typing(chat_id).await {
            debug!(chat_id, "Typing indicator failed: {}", e);
        }

        let (outcome, reply, format) = match message.command() {
            Some(command) => {
                let reply = self.commands.handle(&command, sender_id).await;
                (UpdateOutcome::Command(command.name), reply, ReplyFormat::Html)
            }
            None => {
                let (outcome, reply) = self.convert_links(message).await;
                (outcome, reply, ReplyFormat::Plain)
            }
        };

        metrics::counter!("refbot_messages_total", "outcome" => outcome.label()).increment(1);

        if let Err(e) = self.transport.send_message(chat_id, &reply, format).await {
            warn!(chat_id, "Failed to deliver reply: {}", e);
        }

        info!(
            chat_id,
            user_id = ?sender_id,
            outcome = outcome.label(),
            "Message handled"
        );

        outcome
    }

    async fn convert_links(&self, message: &IncomingMessage) -> (UpdateOutcome, String) {
        let candidates = extract_urls(message.content_text(), message.content_entities());
        let report = self.pipeline.process(&candidates).await;

        if let Some(diagnostic) = report.diagnostic {
            return (
                UpdateOutcome::Rejected(diagnostic),
                diagnostic.user_message().to_string(),
            );
        }

        if let Some(user_id) = message.sender_id() {
            self.record(user_id, &report.short_urls).await;
        }

        (
            UpdateOutcome::Converted(report.short_urls.len()),
            format_links(&report.short_urls),
        )
    }

    async fn record(&self, user_id: i64, short_urls: &[String]) {
        if let Err(e) = self.users.upsert_active(user_id).await {
            warn!(user_id, "Failed to store user: {}", e);
        }

        for url in short_urls {
            let request = NewLinkRequest {
                telegram_id: user_id,
                url: url.clone(),
            };
            if let Err(e) = self.requests.create(request).await {
                warn!(user_id, url = %url, "Failed to store request: {}", e);
            }
        }
    }
}
