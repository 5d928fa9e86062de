//! Per-client rate limiting using the token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

use crate::config::Config;

/// Rate limiter applied to the management API.
pub type RateLimitLayer =
    GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter for the `/api` routes.
///
/// # Limits
///
/// - **Burst**: `RATE_LIMIT_BURST` requests (default 100)
/// - **Refill**: one request every `RATE_LIMIT_REPLENISH_SECONDS` (default 9),
///   which matches 100 requests per 15 minutes
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// The client is identified from `X-Forwarded-For`, `X-Real-IP` or `Forwarded`
/// when present, falling back to the socket peer address.
///
/// # Errors
///
/// Returns an error if either limit is zero.
pub fn layer(config: &Config) -> Result<RateLimitLayer> {
    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_second(config.rate_limit_replenish_seconds)
        .burst_size(config.rate_limit_burst)
        .finish()
        .context("Invalid rate limit configuration")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
