//! Handler for the public leaderboard.

use axum::extract::State;
use axum::Json;
use questlog_db::models::user::LeaderboardEntry;
use questlog_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// Number of users shown on the leaderboard.
pub const LEADERBOARD_SIZE: i64 = 50;

/// GET /api/leaderboard
///
/// Top users by total xp. No authentication required.
pub async fn get_leaderboard(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<LeaderboardEntry>>> {
    let entries = UserRepo::leaderboard(&state.pool, LEADERBOARD_SIZE).await?;
    Ok(Json(entries))
}
