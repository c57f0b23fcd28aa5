use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared handler state, cloned per request by axum.
#[derive(Clone)]
pub struct AppState {
    pub pool: tracker_db::DbPool,
    /// Read by the auth extractor (JWT secret) and the auth handlers
    /// (token lifetime).
    pub config: Arc<ServerConfig>,
}
