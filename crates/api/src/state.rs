use std::sync::Arc;

use crate::config::ServerConfig;
use crate::engine::hooks::ProgressPipeline;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and the rest sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: stride_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Stages run after every successful progress log.
    pub pipeline: Arc<ProgressPipeline>,
}
