//! Repository for the `users` table.

use sqlx::{PgConnection, PgPool};
use questlog_core::types::DbId;

use crate::models::user::{Avatar, CreateUser, LeaderboardEntry, ProgressionUpdate, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, level, xp, gold, hp, max_hp, \
                        streak, last_quest_date, badges, avatar_class, avatar_image, \
                        avatar_name, created_at, updated_at";

/// Provides CRUD and progression operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with default progression, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Replace the user's avatar. Returns `None` if no row with `id` exists.
    pub async fn update_avatar(
        pool: &PgPool,
        id: DbId,
        avatar: &Avatar,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                avatar_class = $2,
                avatar_image = $3,
                avatar_name = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&avatar.avatar_class)
            .bind(&avatar.avatar_image)
            .bind(&avatar.name)
            .fetch_optional(pool)
            .await
    }

    /// Top users by cumulative xp, highest first.
    pub async fn leaderboard(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        sqlx::query_as::<_, LeaderboardEntry>(
            "SELECT username, level, xp, avatar_image
             FROM users
             ORDER BY xp DESC, id ASC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Load a user and take a row lock for the rest of the transaction.
    pub async fn lock_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Write the progression produced by a quest completion.
    ///
    /// Returns the updated row, or `None` if the user no longer exists.
    pub async fn apply_progression(
        conn: &mut PgConnection,
        id: DbId,
        update: &ProgressionUpdate,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                xp = $2,
                gold = $3,
                level = $4,
                streak = $5,
                last_quest_date = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(update.xp)
            .bind(update.gold)
            .bind(update.level)
            .bind(update.streak)
            .bind(update.last_quest_date)
            .fetch_optional(conn)
            .await
    }
}
