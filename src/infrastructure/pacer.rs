//! Send pacing for broadcasts.
//!
//! Telegram accepts roughly 30 messages per second from a bot, so fan-out
//! loops wait for a token before each send instead of sleeping blindly.

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::time::Duration;

/// Grants permission to perform the next paced operation.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Waits until the next operation may start.
    async fn ready(&self);
}

/// Token-bucket pacer with a burst of one: at most one send per interval.
pub struct GovernorPacer {
    limiter: DefaultDirectRateLimiter,
}

impl GovernorPacer {
    /// Creates a pacer allowing one operation per `interval`.
    ///
    /// A zero interval disables pacing.
    pub fn new(interval: Duration) -> Self {
        let quota = Quota::with_period(interval)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MAX));

        Self {
            limiter: RateLimiter::direct(quota),
        }
    }
}

#[async_trait]
impl Pacer for GovernorPacer {
    async fn ready(&self) {
        self.limiter.until_ready().await;
    }
}
