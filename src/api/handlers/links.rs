//! Handlers for link management endpoints (create, list, lookup, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, DeleteLinkResponse};
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/a",
///   "customCode": "promo2025"   // optional, 1-10 letters or digits
/// }
/// ```
///
/// # Response
///
/// `201 Created` with the stored link (`clicks` is 0, `last_clicked` is null).
///
/// # Errors
///
/// - 400 Bad Request - missing URL, invalid URL or invalid custom code
/// - 409 Conflict - custom code already taken
/// - 500 Internal Server Error - store unavailable or no free code found
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<Link>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(&payload.url, payload.custom_code.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(link)))
}

/// Lists every link, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(State(state): State<AppState>) -> Result<Json<Vec<Link>>, AppError> {
    let links = state.link_service.list_links().await?;
    Ok(Json(links))
}

/// Returns a single link without recording a click.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if no link has this code.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Link>, AppError> {
    let link = state.link_service.get_link(&code).await?;
    Ok(Json(link))
}

/// Deletes a link permanently.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Response
///
/// ```json
/// {
///   "message": "Link deleted successfully",
///   "link": { "code": "abc123", "clicks": 3, ... }
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if no link has this code.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    let link = state.link_service.delete_link(&code).await?;

    Ok(Json(DeleteLinkResponse {
        message: "Link deleted successfully",
        link,
    }))
}
