//! Link shortener trait and error types.

use async_trait::async_trait;

/// Errors reported by a link shortening service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortenError {
    #[error("shortening service rate limit reached")]
    RateLimited,

    #[error("shortening service rejected the URL: {0}")]
    InvalidUrl(String),

    #[error("shortening service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("shortening service unreachable: {0}")]
    Transport(String),
}

/// Compresses a long URL into a short one.
///
/// One attempt per call: implementations neither cache nor retry.
///
/// # Implementations
///
/// - [`crate::infrastructure::shortener::BitlyShortener`] - Bitly v4 API
/// - [`crate::infrastructure::shortener::NullShortener`] - Returns the URL unchanged
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkShortener: Send + Sync {
    /// Returns the short URL for `long_url`.
    ///
    /// # Errors
    ///
    /// Returns a [`ShortenError`] describing why the service refused or failed.
    async fn shorten(&self, long_url: &str) -> Result<String, ShortenError>;

    /// Human-readable backend name, used in health output.
    fn name(&self) -> &'static str;
}
