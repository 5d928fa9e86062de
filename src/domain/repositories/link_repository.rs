//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the `links` table.
///
/// Every method maps to exactly one store statement. Implementations must let
/// the store enforce code uniqueness and perform the click increment, so that
/// concurrent callers never lose updates.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with `clicks = 0` and no `last_clicked`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeConflict`] if the code already exists.
    /// Returns [`AppError::StoreUnavailable`] on timeouts and connection failures.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its exact code. Never mutates the row.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Atomically increments `clicks` and sets `last_clicked = now()`.
    ///
    /// Returns the updated row, or `Ok(None)` when no link has this code (in
    /// which case nothing is written).
    async fn record_click(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists every link, most recently created first.
    async fn list(&self) -> Result<Vec<Link>, AppError>;

    /// Removes a link and returns the row as it was before deletion.
    ///
    /// Returns `Ok(None)` if no link has this code.
    async fn delete(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
