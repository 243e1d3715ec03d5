//! Infrastructure layer for external integrations.
//!
//! This layer provides concrete implementations for the collaborators the
//! application services depend on.
//!
//! # Modules
//!
//! - [`resolver`] - Redirect resolution over HTTP
//! - [`shortener`] - Link shortening (Bitly and pass-through)
//! - [`telegram`] - Chat transport (Telegram Bot API)
//! - [`pacer`] - Token-paced scheduling for broadcasts
//! - [`persistence`] - PostgreSQL repository implementations

pub mod pacer;
pub mod persistence;
pub mod resolver;
pub mod shortener;
pub mod telegram;
