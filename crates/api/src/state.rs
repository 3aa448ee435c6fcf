use std::sync::Arc;

use taller_core::schema::SchemaCatalog;
use taller_db::repositories::RelationGuard;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything beyond the pool sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: taller_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Column catalog loaded once at startup; read-only afterwards.
    pub schema: Arc<SchemaCatalog>,
    /// Pre-delete dependency check for workshops.
    pub relation_guard: Arc<dyn RelationGuard>,
}
