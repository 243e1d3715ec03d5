//! Telegram chat transport.
//!
//! - [`ChatTransport`] - Outbound messaging trait
//! - [`BotApiTransport`] - Telegram Bot API implementation

mod bot_api;
mod service;

pub use bot_api::BotApiTransport;
pub use service::{ChatTransport, ReplyFormat, TransportError};

#[cfg(test)]
pub use service::MockChatTransport;
