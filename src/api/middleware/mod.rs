//! HTTP middleware for request processing and protection.
//!
//! Provides CORS, rate limiting, security headers and observability middleware.

pub mod cors;
pub mod rate_limit;
pub mod security_headers;
pub mod tracing;
