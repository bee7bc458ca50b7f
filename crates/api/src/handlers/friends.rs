//! Handlers for the `/friends` resource.
//!
//! Friendships are one-directional: adding someone does not add you to
//! their list.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use questlog_core::error::CoreError;
use questlog_db::models::friendship::FriendSummary;
use questlog_db::repositories::{FriendshipRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /friends/add`.
#[derive(Debug, Deserialize)]
pub struct AddFriendRequest {
    pub friend_username: String,
}

/// Acknowledgement returned after a friend is added.
#[derive(Debug, Serialize)]
pub struct FriendAdded {
    pub message: &'static str,
    pub friend: FriendSummary,
}

/// POST /api/friends/add
pub async fn add_friend(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<AddFriendRequest>,
) -> AppResult<(StatusCode, Json<FriendAdded>)> {
    let username = input.friend_username.trim();

    let friend = UserRepo::find_by_username(&state.pool, username)
        .await?
        .ok_or_else(|| CoreError::NotFoundByName {
            entity: "User",
            name: username.to_string(),
        })?;

    if friend.id == auth.user_id {
        return Err(CoreError::Validation("You cannot add yourself as a friend".into()).into());
    }

    // Duplicates hit `uq_friendships_pair` and surface as 409.
    FriendshipRepo::create(&state.pool, auth.user_id, friend.id).await?;

    tracing::info!(user_id = auth.user_id, friend_id = friend.id, "Friend added");

    Ok((
        StatusCode::CREATED,
        Json(FriendAdded {
            message: "Friend added successfully",
            friend: FriendSummary {
                username: friend.username,
                level: friend.level,
                xp: friend.xp,
                avatar_image: friend.avatar_image,
            },
        }),
    ))
}

/// GET /api/friends
pub async fn list_friends(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FriendSummary>>> {
    let friends = FriendshipRepo::list_friends(&state.pool, auth.user_id).await?;
    Ok(Json(friends))
}
