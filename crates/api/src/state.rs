use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`). The pool is the only shared mutable resource; there is no
/// in-process caching of entities.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: amiibox_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
}
