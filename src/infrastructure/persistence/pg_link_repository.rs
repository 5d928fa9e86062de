//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Default upper bound for a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

const LINK_COLUMNS: &str = "id, code, original_url, clicks, last_clicked, created_at";

/// PostgreSQL repository for the `links` table.
///
/// Each method issues one statement against the shared pool. Connections are
/// checked out per statement and returned on every exit path, including
/// timeouts (dropping the future releases the connection).
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
    store_timeout: Duration,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self::with_timeout(pool, DEFAULT_STORE_TIMEOUT)
    }

    /// Creates a repository whose store calls are bounded by `store_timeout`.
    pub fn with_timeout(pool: Arc<PgPool>, store_timeout: Duration) -> Self {
        Self {
            pool,
            store_timeout,
        }
    }

    /// Runs a store call under the configured timeout.
    ///
    /// An elapsed timeout becomes [`AppError::StoreUnavailable`]; the caller
    /// cannot assume the statement did or did not apply.
    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.store_timeout, fut).await {
            Ok(result) => result.map_err(AppError::from),
            Err(_) => {
                let timeout_ms = self.store_timeout.as_millis() as u64;
                tracing::warn!(op, timeout_ms, "Store call timed out");
                Err(AppError::unavailable(
                    "Store call timed out",
                    json!({ "operation": op, "timeout_ms": timeout_ms }),
                ))
            }
        }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let sql = format!(
            "INSERT INTO links (code, original_url) VALUES ($1, $2) RETURNING {LINK_COLUMNS}"
        );

        self.bounded(
            "create",
            sqlx::query_as::<_, Link>(&sql)
                .bind(&new_link.code)
                .bind(&new_link.original_url)
                .fetch_one(self.pool.as_ref()),
        )
        .await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE code = $1");

        self.bounded(
            "find_by_code",
            sqlx::query_as::<_, Link>(&sql)
                .bind(code)
                .fetch_optional(self.pool.as_ref()),
        )
        .await
    }

    // NOW() is the transaction start, so a call that waited on the row lock
    // may carry an older timestamp; GREATEST keeps last_clicked from moving back.
    async fn record_click(&self, code: &str) -> Result<Option<Link>, AppError> {
        let sql = format!(
            r#"
            UPDATE links
            SET clicks = clicks + 1, last_clicked = GREATEST(last_clicked, NOW())
            WHERE code = $1
            RETURNING {LINK_COLUMNS}
            "#
        );

        self.bounded(
            "record_click",
            sqlx::query_as::<_, Link>(&sql)
                .bind(code)
                .fetch_optional(self.pool.as_ref()),
        )
        .await
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links ORDER BY created_at DESC, id DESC");

        self.bounded(
            "list",
            sqlx::query_as::<_, Link>(&sql).fetch_all(self.pool.as_ref()),
        )
        .await
    }

    async fn delete(&self, code: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("DELETE FROM links WHERE code = $1 RETURNING {LINK_COLUMNS}");

        self.bounded(
            "delete",
            sqlx::query_as::<_, Link>(&sql)
                .bind(code)
                .fetch_optional(self.pool.as_ref()),
        )
        .await
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.bounded(
            "ping",
            sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(self.pool.as_ref()),
        )
        .await
        .map(|_| ())
    }
}
