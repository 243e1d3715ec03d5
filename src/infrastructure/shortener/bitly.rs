//! Bitly v4 API client.

use super::service::{LinkShortener, ShortenError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Bitly shorten request body.
#[derive(Debug, Serialize)]
struct ShortenRequest<'a> {
    long_url: &'a str,
    domain: &'a str,
}

/// Bitly shorten response; only the short link is used.
#[derive(Debug, Deserialize)]
struct ShortenResponse {
    link: String,
}

/// Bitly error payload.
#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: String,
    #[serde(default)]
    description: Option<String>,
}

impl ErrorResponse {
    fn summary(&self) -> String {
        match &self.description {
            Some(description) if !description.is_empty() => {
                format!("{}: {}", self.message, description)
            }
            _ => self.message.clone(),
        }
    }
}

/// Shortens links through `POST /v4/shorten`.
pub struct BitlyShortener {
    client: Client,
    api_url: String,
    api_key: String,
    domain: String,
}

impl BitlyShortener {
    /// Creates a Bitly client.
    ///
    /// # Arguments
    ///
    /// - `api_url` - API base, e.g. `https://api-ssl.bitly.com`
    /// - `api_key` - Bitly access token
    /// - `domain` - short domain to mint links on, e.g. `bit.ly`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        api_url: &str,
        api_key: String,
        domain: String,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            domain,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v4/shorten", self.api_url)
    }
}

#[async_trait]
impl LinkShortener for BitlyShortener {
    async fn shorten(&self, long_url: &str) -> Result<String, ShortenError> {
        let body = ShortenRequest {
            long_url,
            domain: &self.domain,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ShortenError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let parsed: ShortenResponse = response
                .json()
                .await
                .map_err(|e| ShortenError::Transport(format!("invalid response body: {e}")))?;
            debug!(long_url, short_url = %parsed.link, "Link shortened");
            return Ok(parsed.link);
        }

        let error: ErrorResponse = response.json().await.unwrap_or_default();
        warn!(status = %status, error = %error.summary(), "Bitly request failed");

        Err(map_error_status(status, error.summary()))
    }

    fn name(&self) -> &'static str {
        "bitly"
    }
}

fn map_error_status(status: StatusCode, message: String) -> ShortenError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => ShortenError::RateLimited,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ShortenError::InvalidUrl(message)
        }
        _ => ShortenError::Service {
            status: status.as_u16(),
            message,
        },
    }
}
