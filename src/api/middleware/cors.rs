//! Cross-origin policy for the dashboard front end.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Origins of the local development front ends.
const DEV_ORIGINS: &[&str] = &["http://localhost:5173", "http://localhost:3000"];

/// Creates the CORS layer.
///
/// Allows the local development origins plus `client_url` (if configured),
/// with credentials, for the methods and headers the dashboard uses.
/// Origins that are not valid header values are skipped with a warning.
pub fn layer(client_url: Option<&str>) -> CorsLayer {
    let origins: Vec<HeaderValue> = DEV_ORIGINS
        .iter()
        .copied()
        .chain(client_url)
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
