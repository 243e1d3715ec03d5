//! Chat transport trait and error types.

use async_trait::async_trait;

/// Errors returned while talking to the chat platform.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The recipient blocked the bot or the bot was removed from the chat.
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("chat API error {code}: {description}")]
    Api { code: i64, description: String },

    #[error("chat API unreachable: {0}")]
    Network(String),
}

/// How the text of an outgoing message is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFormat {
    Plain,
    Html,
}

/// Outbound side of the chat platform.
///
/// # Implementations
///
/// - [`crate::infrastructure::telegram::BotApiTransport`] - Telegram Bot API over HTTPS
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends a text message to a chat.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Forbidden`] when the recipient blocked the bot.
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        format: ReplyFormat,
    ) -> Result<(), TransportError>;

    /// Shows the "typing…" indicator in a chat.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the platform rejects the action.
    async fn send_typing(&self, chat_id: i64) -> Result<(), TransportError>;
}
