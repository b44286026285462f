use std::sync::Arc;

use comicforge_db::cache::ScopeCache;
use comicforge_events::NotificationBus;

use crate::config::ServerConfig;
use crate::workshop::WorkshopService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: comicforge_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-scope list cache shared by reads and invalidated by mutations.
    pub cache: Arc<ScopeCache>,
    /// Fire-and-forget user notification sink.
    pub bus: Arc<NotificationBus>,
    /// Stateful mediator for workshop actions.
    pub workshop: Arc<WorkshopService>,
}
