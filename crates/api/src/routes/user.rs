//! Route definitions for the `/user` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// GET /profile -> get_profile
/// PUT /avatar  -> update_avatar
/// GET /stats   -> get_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(user::get_profile))
        .route("/avatar", put(user::update_avatar))
        .route("/stats", get(user::get_stats))
}
