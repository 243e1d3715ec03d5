//! Telegram Bot API client.

use super::service::{ChatTransport, ReplyFormat, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct SendChatAction {
    chat_id: i64,
    action: &'static str,
}

/// Envelope of every Bot API response.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    description: Option<String>,
}

impl ApiResponse {
    fn into_result(self) -> Result<(), TransportError> {
        if self.ok {
            return Ok(());
        }

        let description = self.description.unwrap_or_default();
        match self.error_code {
            Some(403) => Err(TransportError::Forbidden(description)),
            code => Err(TransportError::Api {
                code: code.unwrap_or_default(),
                description,
            }),
        }
    }
}

/// Sends messages through `https://api.telegram.org/bot<token>/<method>`.
pub struct BotApiTransport {
    client: Client,
    base_url: String,
}

impl BotApiTransport {
    /// Creates a Bot API client for the given token.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_url: &str, token: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
        })
    }

    async fn call<T: Serialize + Sync>(&self, method: &str, body: &T) -> Result<(), TransportError> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, method))
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let envelope: ApiResponse = response.json().await.map_err(|e| TransportError::Api {
            code: i64::from(status.as_u16()),
            description: format!("invalid response body: {}", e.without_url()),
        })?;

        envelope.into_result()
    }
}

#[async_trait]
impl ChatTransport for BotApiTransport {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        format: ReplyFormat,
    ) -> Result<(), TransportError> {
        let body = SendMessage {
            chat_id,
            text,
            parse_mode: match format {
                ReplyFormat::Plain => None,
                ReplyFormat::Html => Some("HTML"),
            },
        };

        self.call("sendMessage", &body).await
    }

    async fn send_typing(&self, chat_id: i64) -> Result<(), TransportError> {
        let body = SendChatAction {
            chat_id,
            action: "typing",
        };

        self.call("sendChatAction", &body).await
    }
}
