//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::persistence::PgLinkRepository;

/// Link service backed by PostgreSQL.
pub type PgLinkService = LinkService<PgLinkRepository>;

/// State shared across requests.
///
/// Holds no mutable in-process data; the only shared resource is the
/// connection pool inside the repository.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<PgLinkService>,
}

impl AppState {
    /// Wires the service graph on top of a link repository.
    pub fn new(link_repository: Arc<PgLinkRepository>) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(link_repository)),
        }
    }
}
