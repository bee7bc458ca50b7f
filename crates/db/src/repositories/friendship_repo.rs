//! Repository for the `friendships` table.

use sqlx::PgPool;
use questlog_core::types::DbId;

use crate::models::friendship::{FriendSummary, Friendship};

const COLUMNS: &str = "id, user_id, friend_id, created_at";

/// Maximum number of friends returned by [`FriendshipRepo::list_friends`].
pub const FRIEND_LIST_LIMIT: i64 = 100;

/// Provides operations for one-directional friendships.
pub struct FriendshipRepo;

impl FriendshipRepo {
    /// Record that `user_id` follows `friend_id`.
    ///
    /// A duplicate pair violates `uq_friendships_pair`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        friend_id: DbId,
    ) -> Result<Friendship, sqlx::Error> {
        let query = format!(
            "INSERT INTO friendships (user_id, friend_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Friendship>(&query)
            .bind(user_id)
            .bind(friend_id)
            .fetch_one(pool)
            .await
    }

    /// Public summaries of everyone `user_id` has added, oldest friendship first.
    pub async fn list_friends(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FriendSummary>, sqlx::Error> {
        sqlx::query_as::<_, FriendSummary>(
            "SELECT u.username, u.level, u.xp, u.avatar_image
             FROM friendships f
             JOIN users u ON u.id = f.friend_id
             WHERE f.user_id = $1
             ORDER BY f.created_at ASC, f.id ASC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(FRIEND_LIST_LIMIT)
        .fetch_all(pool)
        .await
    }
}
