//! `reqwest`-backed redirect resolver.

use super::service::{RedirectResolver, ResolveError};
use async_trait::async_trait;
use reqwest::{Client, redirect::Policy};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Resolves short links with a HEAD request, letting `reqwest` follow redirects.
///
/// Same-origin and cross-origin 3xx responses are followed up to the configured
/// hop limit. The status of the final response is not inspected.
pub struct HttpRedirectResolver {
    client: Client,
}

impl HttpRedirectResolver {
    /// Builds a resolver with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration, max_redirects: usize) -> reqwest::Result<Self> {
        let client = Client::builder()
            .redirect(Policy::limited(max_redirects))
            .timeout(timeout)
            .user_agent(concat!("refbot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl RedirectResolver for HttpRedirectResolver {
    async fn resolve(&self, url: &Url) -> Result<Url, ResolveError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ResolveError::UnsupportedScheme(url.scheme().to_string()));
        }

        let response = self
            .client
            .head(url.clone())
            .send()
            .await
            .map_err(|e| ResolveError::Network(e.to_string()))?;

        let resolved = response.url().clone();
        debug!(from = %url, to = %resolved, status = %response.status(), "URL resolved");

        Ok(resolved)
    }
}
