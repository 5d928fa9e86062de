//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL and records the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Increment `clicks` and stamp `last_clicked` in one store statement
/// 2. Return `302 Found` with `Location` set to the destination
///
/// The click is counted before the response is sent; there is no cache in
/// front of the store.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist (nothing is written).
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let link = state.link_service.resolve_and_track(&code).await?;

    // Serialize through `Url` so IDN hosts and non-ASCII paths become a valid header.
    let location = Url::parse(&link.original_url)
        .map(String::from)
        .unwrap_or(link.original_url);

    let location = HeaderValue::try_from(location).map_err(|e| {
        AppError::internal(
            "Stored URL is not a valid Location header",
            json!({ "code": code, "reason": e.to_string() }),
        )
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
