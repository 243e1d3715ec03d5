//! PostgreSQL implementation of request repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{LinkRequest, NewLinkRequest};
use crate::domain::repositories::RequestRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct RequestRow {
    id: i64,
    telegram_id: i64,
    url: String,
    created_at: DateTime<Utc>,
}

impl From<RequestRow> for LinkRequest {
    fn from(row: RequestRow) -> Self {
        LinkRequest::new(row.id, row.telegram_id, row.url, row.created_at)
    }
}

/// PostgreSQL repository for the referral request history.
pub struct PgRequestRepository {
    pool: Arc<PgPool>,
}

impl PgRequestRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestRepository for PgRequestRepository {
    async fn create(&self, new_request: NewLinkRequest) -> Result<LinkRequest, AppError> {
        let row = sqlx::query_as::<_, RequestRow>(
            r#"
            INSERT INTO requests (telegram_id, url)
            VALUES ($1, $2)
            RETURNING id, telegram_id, url, created_at
            "#,
        )
        .bind(new_request.telegram_id)
        .bind(&new_request.url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list_since(&self, since: DateTime<Utc>) -> Result<Vec<LinkRequest>, AppError> {
        let rows = sqlx::query_as::<_, RequestRow>(
            r#"
            SELECT id, telegram_id, url, created_at
            FROM requests
            WHERE created_at > $1
            ORDER BY created_at, id
            "#,
        )
        .bind(since)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(LinkRequest::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM requests")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
