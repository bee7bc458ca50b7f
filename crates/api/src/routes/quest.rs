//! Route definitions for the `/quests` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::quest;
use crate::state::AppState;

/// Routes mounted at `/quests`.
///
/// ```text
/// POST /create         -> create_quest
/// POST /generate       -> generate_quest
/// GET  /active         -> list_active
/// GET  /completed      -> list_completed
/// POST /{id}/complete  -> complete_quest
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(quest::create_quest))
        .route("/generate", post(quest::generate_quest))
        .route("/active", get(quest::list_active))
        .route("/completed", get(quest::list_completed))
        .route("/{id}/complete", post(quest::complete_quest))
}
