//! Redirect resolver trait and error types.

use async_trait::async_trait;
use url::Url;

/// Errors raised while following a URL to its final destination.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The request could not be completed (DNS, connection, timeout, redirect loop).
    #[error("network error: {0}")]
    Network(String),

    /// Only `http` and `https` URLs are requested.
    #[error("unsupported scheme '{0}'")]
    UnsupportedScheme(String),
}

/// Follows HTTP redirection for a URL and returns where it ends up.
///
/// # Implementations
///
/// - [`crate::infrastructure::resolver::HttpRedirectResolver`] - HEAD request via `reqwest`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectResolver: Send + Sync {
    /// Issues a body-less request against `url` and returns the terminal URL
    /// after every redirect has been followed.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnsupportedScheme`] for non-HTTP(S) URLs and
    /// [`ResolveError::Network`] when the request cannot be completed.
    async fn resolve(&self, url: &Url) -> Result<Url, ResolveError>;
}
