//! DTOs for link management endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request to create a short link.
///
/// Accepts both `customCode` and `custom_code` for the optional code.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Destination URL. Format is checked by the service.
    #[serde(default)]
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,

    /// Optional caller-chosen code. Format is checked by the service.
    #[serde(default, rename = "customCode", alias = "custom_code")]
    pub custom_code: Option<String>,
}

/// Response body for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteLinkResponse {
    pub message: &'static str,
    pub link: Link,
}
