//! Core domain entities.
//!
//! - [`IncomingMessage`] - A chat message with its entity spans
//! - [`BotUser`] - A user known to the bot
//! - [`LinkRequest`] - A referral link handed out to a user
//!
//! Creation inputs use separate structs (`NewLinkRequest`).

pub mod message;
pub mod request;
pub mod user;

pub use message::{Chat, Command, EntityKind, IncomingMessage, MessageEntity, Sender};
pub use request::{LinkRequest, NewLinkRequest};
pub use user::BotUser;
