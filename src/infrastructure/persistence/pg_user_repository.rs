//! PostgreSQL implementation of user repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::BotUser;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct UserRow {
    telegram_id: i64,
    is_admin: bool,
    has_blocked_bot: bool,
}

impl From<UserRow> for BotUser {
    fn from(row: UserRow) -> Self {
        Self {
            telegram_id: row.telegram_id,
            is_admin: row.is_admin,
            has_blocked_bot: row.has_blocked_bot,
        }
    }
}

/// PostgreSQL repository for bot users.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn upsert_active(&self, telegram_id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO users (telegram_id)
            VALUES ($1)
            ON CONFLICT (telegram_id)
            DO UPDATE SET has_blocked_bot = FALSE
            "#,
        )
        .bind(telegram_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn set_blocked(&self, telegram_id: i64, blocked: bool) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE users
            SET has_blocked_bot = $2
            WHERE telegram_id = $1
            "#,
        )
        .bind(telegram_id)
        .bind(blocked)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn list_reachable(&self) -> Result<Vec<BotUser>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT telegram_id, is_admin, has_blocked_bot
            FROM users
            WHERE has_blocked_bot = FALSE
            ORDER BY created_at
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(BotUser::from).collect())
    }

    async fn is_admin(&self, telegram_id: i64) -> Result<bool, AppError> {
        let is_admin = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT is_admin
            FROM users
            WHERE telegram_id = $1
            "#,
        )
        .bind(telegram_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(is_admin.unwrap_or(false))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
