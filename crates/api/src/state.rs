use std::sync::Arc;

use valkyrie_app::Dispatcher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Command and query handlers over the configured repositories.
    pub dispatcher: Arc<Dispatcher>,
    /// Database pool, absent when the handlers run over the in-memory store.
    pub pool: Option<valkyrie_db::DbPool>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
