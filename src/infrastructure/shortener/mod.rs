//! Link shortening backends.
//!
//! Provides a [`LinkShortener`] trait with two implementations:
//! - [`BitlyShortener`] - Production Bitly-backed shortener
//! - [`NullShortener`] - Pass-through when shortening is disabled

mod bitly;
mod null_shortener;
mod service;

pub use bitly::BitlyShortener;
pub use null_shortener::NullShortener;
pub use service::{LinkShortener, ShortenError};

#[cfg(test)]
pub use service::MockLinkShortener;
