//! Repository trait for referral link requests.

use crate::domain::entities::{LinkRequest, NewLinkRequest};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for the history of handed-out referral links.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Records a new request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_request: NewLinkRequest) -> Result<LinkRequest, AppError>;

    /// Lists requests created strictly after `since`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_since(&self, since: DateTime<Utc>) -> Result<Vec<LinkRequest>, AppError>;

    /// Counts all recorded requests.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
