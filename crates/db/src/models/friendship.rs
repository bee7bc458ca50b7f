//! Friendship entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use questlog_core::types::{DbId, Timestamp};

/// A row from the `friendships` table. Friendships are one-directional.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Friendship {
    pub id: DbId,
    pub user_id: DbId,
    pub friend_id: DbId,
    pub created_at: Timestamp,
}

/// Public view of a friend, joined from `users`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FriendSummary {
    pub username: String,
    pub level: i32,
    pub xp: i64,
    pub avatar_image: Option<String>,
}
