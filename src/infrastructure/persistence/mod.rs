//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage, click accounting and retrieval

pub mod pg_link_repository;

pub use pg_link_repository::{DEFAULT_STORE_TIMEOUT, PgLinkRepository};
