//! HTTP layer for the Telegram webhook and operational endpoints.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Webhook authentication and request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
