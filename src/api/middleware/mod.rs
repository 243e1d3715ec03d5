//! HTTP middleware for request processing and protection.

pub mod tracing;
pub mod webhook_auth;
