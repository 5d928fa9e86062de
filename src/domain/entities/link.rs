//! Link entity representing a short code mapped to a destination URL.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted short link with its click counters.
///
/// `clicks` starts at zero and only grows through the redirect path.
/// `last_clicked` stays `None` until the first redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        original_url: String,
        clicks: i64,
        last_clicked: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            original_url,
            clicks,
            last_clicked,
            created_at,
        }
    }

    /// Returns true if the link has been followed at least once.
    pub fn has_been_clicked(&self) -> bool {
        self.last_clicked.is_some()
    }
}

/// Input data for inserting a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub original_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = Link::new(
            1,
            "abc123".to_string(),
            "https://example.com".to_string(),
            0,
            None,
            now,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.code, "abc123");
        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.clicks, 0);
        assert_eq!(link.created_at, now);
        assert!(!link.has_been_clicked());
    }

    #[test]
    fn test_link_clicked() {
        let link = Link::new(
            2,
            "xyz".to_string(),
            "https://example.com".to_string(),
            3,
            Some(Utc::now()),
            Utc::now(),
        );
        assert!(link.has_been_clicked());
    }

    #[test]
    fn test_link_serializes_null_last_clicked() {
        let link = Link::new(
            1,
            "abc123".to_string(),
            "https://example.com/a".to_string(),
            0,
            None,
            Utc::now(),
        );

        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["code"], "abc123");
        assert_eq!(json["original_url"], "https://example.com/a");
        assert_eq!(json["clicks"], 0);
        assert!(json["last_clicked"].is_null());
        assert!(json["created_at"].is_string());
    }
}
