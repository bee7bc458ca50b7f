use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state handed to every handler via `State<AppState>`.
///
/// Cloning is cheap: the pool is reference-counted internally and the
/// config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Opened in `main` before the listener binds, closed after it drains.
    pub pool: questlog_db::DbPool,
    /// Limits and secrets loaded at startup.
    pub config: Arc<ServerConfig>,
}
