//! Handlers for the `/user` resource (profile, avatar, stats).

use axum::extract::State;
use axum::Json;
use questlog_core::error::CoreError;
use questlog_core::progression::xp_to_next_level;
use questlog_core::quest::QuestStatus;
use questlog_core::types::DbId;
use questlog_db::models::user::{Avatar, User, UserResponse};
use questlog_db::repositories::{QuestRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /user/avatar`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAvatarRequest {
    #[validate(length(min = 1, max = 64))]
    pub avatar_class: String,
    #[validate(length(min = 1, max = 512))]
    pub avatar_image: String,
    #[validate(length(min = 1, max = 64))]
    pub name: String,
}

/// Progression summary returned by `GET /user/stats`.
#[derive(Debug, Serialize)]
pub struct UserStats {
    pub level: i32,
    pub xp: i64,
    pub gold: i64,
    pub hp: i32,
    pub max_hp: i32,
    pub streak: i32,
    pub badges: Vec<String>,
    pub completed_quests: i64,
    pub active_quests: i64,
    pub xp_to_next_level: i64,
}

/// Load the caller's user row. A valid token for a deleted account is a 404.
pub(crate) async fn load_user(state: &AppState, user_id: DbId) -> AppResult<User> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", user_id))?;
    Ok(user)
}

/// GET /api/user/profile
pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = load_user(&state, auth.user_id).await?;
    Ok(Json(user.into()))
}

/// PUT /api/user/avatar
///
/// Replace the caller's avatar. All three parts are set together.
pub async fn update_avatar(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateAvatarRequest>,
) -> AppResult<Json<UserResponse>> {
    input.validate()?;

    let avatar = Avatar {
        avatar_class: input.avatar_class,
        avatar_image: input.avatar_image,
        name: input.name,
    };
    let user = UserRepo::update_avatar(&state.pool, auth.user_id, &avatar)
        .await?
        .ok_or_else(|| CoreError::not_found("User", auth.user_id))?;

    tracing::info!(user_id = user.id, avatar_class = %avatar.avatar_class, "Avatar updated");

    Ok(Json(user.into()))
}

/// GET /api/user/stats
pub async fn get_stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserStats>> {
    let user = load_user(&state, auth.user_id).await?;

    let completed_quests =
        QuestRepo::count_by_status(&state.pool, user.id, QuestStatus::Completed).await?;
    let active_quests =
        QuestRepo::count_by_status(&state.pool, user.id, QuestStatus::Active).await?;

    Ok(Json(UserStats {
        level: user.level,
        xp: user.xp,
        gold: user.gold,
        hp: user.hp,
        max_hp: user.max_hp,
        streak: user.streak,
        xp_to_next_level: xp_to_next_level(user.level, user.xp),
        badges: user.badges,
        completed_quests,
        active_quests,
    }))
}
