//! Repository trait for bot users.

use crate::domain::entities::BotUser;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for users who interacted with the bot.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Records a user as active.
    ///
    /// Inserts the user if unknown; otherwise clears the blocked flag, since a
    /// user who writes to the bot has evidently unblocked it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn upsert_active(&self, telegram_id: i64) -> Result<(), AppError>;

    /// Updates whether the user has blocked the bot.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_blocked(&self, telegram_id: i64, blocked: bool) -> Result<(), AppError>;

    /// Lists every user who has not blocked the bot.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_reachable(&self) -> Result<Vec<BotUser>, AppError>;

    /// Returns whether the user carries the admin flag. Unknown users are not admins.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn is_admin(&self, telegram_id: i64) -> Result<bool, AppError>;

    /// Counts all known users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
