//! Data Transfer Objects for HTTP request/response serialization.

pub mod health;
pub mod update;
