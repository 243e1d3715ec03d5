//! Webhook secret token verification.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

use crate::{error::AppError, state::AppState};

/// Header Telegram sets to the `secret_token` registered with `setWebhook`.
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Rejects webhook calls that do not carry the configured secret token.
///
/// When no secret is configured every request passes.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing or does not match.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(expected) = st.webhook_secret.as_deref() {
        let provided = req
            .headers()
            .get(SECRET_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());

        if !provided.is_some_and(|p| tokens_match(p, expected)) {
            return Err(AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Secret token is missing or invalid"}),
            ));
        }
    }

    Ok(next.run(req).await)
}

/// Constant-time comparison of the header value against the secret.
fn tokens_match(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}
