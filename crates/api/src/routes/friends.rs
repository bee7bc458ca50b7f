//! Route definitions for the `/friends` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::friends;
use crate::state::AppState;

/// Routes mounted at `/friends`.
///
/// ```text
/// GET  /     -> list_friends
/// POST /add  -> add_friend
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(friends::list_friends))
        .route("/add", post(friends::add_friend))
}
