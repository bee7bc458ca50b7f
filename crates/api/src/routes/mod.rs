pub mod auth;
pub mod friends;
pub mod health;
pub mod leaderboard;
pub mod quest;
pub mod shop;
pub mod user;
pub mod verification;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                     register (public)
/// /auth/login                        login (public)
///
/// /user/profile                      get profile
/// /user/avatar                       update avatar (PUT)
/// /user/stats                        progression summary
///
/// /quests/create                     create quest (POST)
/// /quests/generate                   create quest from template (POST)
/// /quests/active                     list active quests
/// /quests/completed                  list completed quests
/// /quests/{id}/complete              complete quest (POST)
///
/// /verification/photo                attach photo evidence (POST, multipart)
/// /verification/quiz/generate        attach quiz evidence (POST)
/// /verification/quiz/submit          score quiz answers (POST)
///
/// /leaderboard                       top users by xp (public)
/// /shop/items                        item catalogue (public)
///
/// /friends                           list friends
/// /friends/add                       add friend (POST)
/// ```
pub fn api_routes(max_photo_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/user", user::router())
        .nest("/quests", quest::router())
        .nest("/verification", verification::router(max_photo_bytes))
        .nest("/leaderboard", leaderboard::router())
        .nest("/shop", shop::router())
        .nest("/friends", friends::router())
}
