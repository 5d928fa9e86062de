//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic lives in services (see [`crate::application::services`])
//!
//! # Redirect Flow
//!
//! 1. HTTP handler receives a redirect request
//! 2. [`crate::application::services::LinkService::resolve_and_track`] is called
//! 3. [`repositories::LinkRepository::record_click`] increments the counter and
//!    stamps `last_clicked` in one store statement
//! 4. The handler redirects to the returned destination

pub mod entities;
pub mod repositories;
