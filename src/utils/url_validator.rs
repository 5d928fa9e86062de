//! Destination URL validation.
//!
//! Destinations must be absolute `http` or `https` URLs with a host. The URL is
//! stored exactly as submitted (minus surrounding whitespace); parsing is only
//! used to decide whether it is acceptable.

use crate::error::AppError;
use serde_json::json;
use url::Url;

/// Reasons a destination URL is rejected.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Checks that `input` is an absolute http/https URL with a host.
///
/// Returns the trimmed input on success. Dangerous schemes such as
/// `javascript:`, `data:` and `file:` are rejected.
///
/// # Errors
///
/// See [`UrlValidationError`].
///
/// # Examples
///
/// ```ignore
/// assert_eq!(check_url(" https://example.com/a ").unwrap(), "https://example.com/a");
/// assert!(check_url("example.com").is_err());
/// assert!(check_url("ftp://example.com").is_err());
/// ```
pub fn check_url(input: &str) -> Result<&str, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(trimmed)
}

/// Validates a destination URL before any store interaction.
///
/// # Errors
///
/// Returns [`AppError::InvalidUrl`] with the rejection reason in `details`.
pub fn validate_url(input: &str) -> Result<String, AppError> {
    check_url(input).map(str::to_owned).map_err(|e| {
        AppError::invalid_url("Invalid URL", json!({ "reason": e.to_string() }))
    })
}
