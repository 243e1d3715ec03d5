//! No-op shortener used when no shortening service is configured.

use super::service::{LinkShortener, ShortenError};
use async_trait::async_trait;
use tracing::debug;

/// A shortener that hands the long URL back untouched.
///
/// Used when `BITLY_KEY` is not set, so referral links are still delivered.
pub struct NullShortener;

impl NullShortener {
    pub fn new() -> Self {
        debug!("Using NullShortener (shortening disabled)");
        Self
    }
}

impl Default for NullShortener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkShortener for NullShortener {
    async fn shorten(&self, long_url: &str) -> Result<String, ShortenError> {
        Ok(long_url.to_string())
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}
