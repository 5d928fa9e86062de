//! Link creation, lookup, click tracking and deletion.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{code_candidates, is_valid_code, validate_code};
use crate::utils::url_validator::validate_url;
use serde_json::json;

/// Number of generated codes tried before giving up on a create.
pub const MAX_CODE_ATTEMPTS: usize = 5;

/// Service owning the link lifecycle.
///
/// Validation happens before any store call. Uniqueness and click counting are
/// delegated to the repository, which relies on store-side constraints and
/// atomic updates rather than in-process locking.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Creates a short link.
    ///
    /// # Code Selection
    ///
    /// - If `custom_code` is provided, it is validated and inserted once. A
    ///   taken code fails immediately with [`AppError::CodeConflict`].
    /// - Otherwise, random 6-character codes are tried up to
    ///   [`MAX_CODE_ATTEMPTS`] times; each unique violation moves on to a fresh
    ///   candidate.
    ///
    /// An empty custom code counts as absent. Any other value, including one
    /// padded with whitespace, must match the code format as given.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] - malformed destination (no store call made)
    /// - [`AppError::InvalidCodeFormat`] - malformed custom code (no store call made)
    /// - [`AppError::CodeConflict`] - custom code already taken
    /// - [`AppError::CodeExhausted`] - every generated candidate collided
    /// - [`AppError::StoreUnavailable`] - store timeout or connection failure
    pub async fn create_link(
        &self,
        original_url: &str,
        custom_code: Option<&str>,
    ) -> Result<Link, AppError> {
        let original_url = validate_url(original_url)?;

        let custom_code = custom_code.filter(|c| !c.is_empty());

        if let Some(code) = custom_code {
            validate_code(code)?;

            let link = self
                .link_repository
                .create(NewLink {
                    code: code.to_string(),
                    original_url,
                })
                .await
                .map_err(|e| match e {
                    AppError::CodeConflict { .. } => AppError::conflict(
                        "Custom code already exists",
                        json!({ "code": code }),
                    ),
                    other => other,
                })?;

            tracing::info!(code = %link.code, "Link created with custom code");
            metrics::counter!("links_created_total", "kind" => "custom").increment(1);
            return Ok(link);
        }

        self.create_with_generated_code(original_url).await
    }

    /// Inserts with generated codes, retrying on collisions.
    async fn create_with_generated_code(&self, original_url: String) -> Result<Link, AppError> {
        for (attempt, code) in code_candidates().take(MAX_CODE_ATTEMPTS).enumerate() {
            let new_link = NewLink {
                code,
                original_url: original_url.clone(),
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => {
                    tracing::info!(code = %link.code, attempt = attempt + 1, "Link created");
                    metrics::counter!("links_created_total", "kind" => "generated").increment(1);
                    return Ok(link);
                }
                Err(AppError::CodeConflict { .. }) => {
                    tracing::debug!(attempt = attempt + 1, "Generated code collided, retrying");
                    metrics::counter!("link_code_collisions_total").increment(1);
                }
                Err(e) => return Err(e),
            }
        }

        tracing::warn!(attempts = MAX_CODE_ATTEMPTS, "Could not find a free code");

        Err(AppError::exhausted(
            "Failed to generate unique code",
            json!({ "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Retrieves a link by code without touching its counters.
    ///
    /// A code that could never have been stored is reported as not found
    /// without querying the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        if !is_valid_code(code) {
            return Err(link_not_found(code));
        }

        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| link_not_found(code))
    }

    /// Resolves a code for the redirect path and records the click.
    ///
    /// The increment and `last_clicked` update are one store-side statement, so
    /// concurrent redirects of the same code are all counted. Returns the
    /// updated link; a miss writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn resolve_and_track(&self, code: &str) -> Result<Link, AppError> {
        if !is_valid_code(code) {
            return Err(link_not_found(code));
        }

        let link = self
            .link_repository
            .record_click(code)
            .await?
            .ok_or_else(|| link_not_found(code))?;

        tracing::debug!(code = %link.code, clicks = link.clicks, "Click recorded");
        metrics::counter!("link_redirects_total").increment(1);

        Ok(link)
    }

    /// Lists all links, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list().await
    }

    /// Deletes a link, returning the record as it was before removal.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn delete_link(&self, code: &str) -> Result<Link, AppError> {
        if !is_valid_code(code) {
            return Err(link_not_found(code));
        }

        let link = self
            .link_repository
            .delete(code)
            .await?
            .ok_or_else(|| link_not_found(code))?;

        tracing::info!(code = %link.code, clicks = link.clicks, "Link deleted");
        metrics::counter!("links_deleted_total").increment(1);

        Ok(link)
    }

    /// Checks that the backing store answers.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }
}

fn link_not_found(code: &str) -> AppError {
    AppError::not_found("Link not found", json!({ "code": code }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;
    use mockall::Sequence;

    fn create_test_link(code: &str, url: &str, clicks: i64) -> Link {
        Link::new(
            10,
            code.to_string(),
            url.to_string(),
            clicks,
            (clicks > 0).then(Utc::now),
            Utc::now(),
        )
    }

    fn conflict() -> AppError {
        AppError::conflict("Code already exists", json!({}))
    }

    #[tokio::test]
    async fn test_create_link_with_generated_code() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_link| {
                new_link.code.len() == 6
                    && new_link.code.chars().all(|c| c.is_ascii_alphanumeric())
                    && new_link.original_url == "https://example.com/a"
            })
            .times(1)
            .returning(|new_link| Ok(create_test_link(&new_link.code, &new_link.original_url, 0)));

        let service = LinkService::new(Arc::new(mock_repo));

        let link = service
            .create_link("https://example.com/a", None)
            .await
            .unwrap();

        assert_eq!(link.code.len(), 6);
        assert_eq!(link.clicks, 0);
        assert!(link.last_clicked.is_none());
    }

    #[tokio::test]
    async fn test_create_link_with_custom_code() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_link| new_link.code == "Promo2025")
            .times(1)
            .returning(|new_link| Ok(create_test_link(&new_link.code, &new_link.original_url, 0)));

        let service = LinkService::new(Arc::new(mock_repo));

        let link = service
            .create_link("https://example.com", Some("Promo2025"))
            .await
            .unwrap();

        assert_eq!(link.code, "Promo2025");
    }

    #[tokio::test]
    async fn test_create_link_empty_custom_code_is_generated() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_link| new_link.code.len() == 6)
            .times(1)
            .returning(|new_link| Ok(create_test_link(&new_link.code, &new_link.original_url, 0)));

        let service = LinkService::new(Arc::new(mock_repo));

        let link = service
            .create_link("https://example.com", Some(""))
            .await
            .unwrap();

        assert_eq!(link.code.len(), 6);
    }

    #[tokio::test]
    async fn test_create_link_padded_custom_code_is_rejected() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        for padded in [" abc ", "abc ", "   "] {
            let result = service
                .create_link("https://example.com", Some(padded))
                .await;

            assert!(
                matches!(result, Err(AppError::InvalidCodeFormat { .. })),
                "{padded:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_create_link_invalid_url_never_hits_store() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.create_link("not-a-url", None).await;

        assert!(matches!(result, Err(AppError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_create_link_invalid_custom_code_never_hits_store() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service
            .create_link("https://example.com", Some("bad-code!"))
            .await;

        assert!(matches!(result, Err(AppError::InvalidCodeFormat { .. })));
    }

    #[tokio::test]
    async fn test_create_link_url_checked_before_code() {
        let mock_repo = MockLinkRepository::new();
        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.create_link("nope", Some("bad-code!")).await;

        assert!(matches!(result, Err(AppError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_create_link_custom_code_conflict_is_not_retried() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(conflict()));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service
            .create_link("https://example.com", Some("taken123"))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::CodeConflict { .. }));
        assert_eq!(err.to_string(), "Custom code already exists");
    }

    #[tokio::test]
    async fn test_create_link_retries_generated_code_on_conflict() {
        let mut mock_repo = MockLinkRepository::new();
        let mut seq = Sequence::new();

        mock_repo
            .expect_create()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Err(conflict()));

        mock_repo
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_link| Ok(create_test_link(&new_link.code, &new_link.original_url, 0)));

        let service = LinkService::new(Arc::new(mock_repo));

        let link = service
            .create_link("https://example.com", None)
            .await
            .unwrap();

        assert_eq!(link.code.len(), 6);
    }

    #[tokio::test]
    async fn test_create_link_gives_up_after_max_attempts() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .times(MAX_CODE_ATTEMPTS)
            .returning(|_| Err(conflict()));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.create_link("https://example.com", None).await;

        assert!(matches!(result, Err(AppError::CodeExhausted { .. })));
    }

    #[tokio::test]
    async fn test_create_link_store_unavailable_is_not_retried() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::unavailable("Store unavailable", json!({}))));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.create_link("https://example.com", None).await;

        assert!(matches!(result, Err(AppError::StoreUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_get_link_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|code| Ok(Some(create_test_link(code, "https://example.com", 4))));
        mock_repo.expect_record_click().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let link = service.get_link("abc123").await.unwrap();
        assert_eq!(link.clicks, 4);
    }

    #[tokio::test]
    async fn test_get_link_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.get_link("missing").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_link_malformed_code_skips_store() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_find_by_code().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.get_link("favicon.ico").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_and_track_records_click() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_record_click()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|code| Ok(Some(create_test_link(code, "https://example.com/a", 1))));
        mock_repo.expect_find_by_code().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let link = service.resolve_and_track("abc123").await.unwrap();
        assert_eq!(link.original_url, "https://example.com/a");
        assert_eq!(link.clicks, 1);
        assert!(link.last_clicked.is_some());
    }

    #[tokio::test]
    async fn test_resolve_and_track_miss() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_record_click()
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.resolve_and_track("nothere").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_links_passes_through() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_list().times(1).returning(|| {
            Ok(vec![
                create_test_link("new1", "https://example.com/2", 0),
                create_test_link("old1", "https://example.com/1", 0),
            ])
        });

        let service = LinkService::new(Arc::new(mock_repo));

        let links = service.list_links().await.unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].code, "new1");
    }

    #[tokio::test]
    async fn test_delete_link_returns_record() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_delete()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|code| Ok(Some(create_test_link(code, "https://example.com", 3))));

        let service = LinkService::new(Arc::new(mock_repo));

        let link = service.delete_link("abc123").await.unwrap();
        assert_eq!(link.clicks, 3);
    }

    #[tokio::test]
    async fn test_delete_link_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_delete().times(1).returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.delete_link("missing").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
