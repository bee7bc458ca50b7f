//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use questlog_core::types::{CalendarDate, DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub level: i32,
    pub xp: i64,
    pub gold: i64,
    pub hp: i32,
    pub max_hp: i32,
    pub streak: i32,
    pub last_quest_date: Option<CalendarDate>,
    pub badges: Vec<String>,
    pub avatar_class: Option<String>,
    pub avatar_image: Option<String>,
    pub avatar_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// The avatar, if all of its parts have been chosen.
    pub fn avatar(&self) -> Option<Avatar> {
        match (&self.avatar_class, &self.avatar_image, &self.avatar_name) {
            (Some(class), Some(image), Some(name)) => Some(Avatar {
                avatar_class: class.clone(),
                avatar_image: image.clone(),
                name: name.clone(),
            }),
            _ => None,
        }
    }
}

/// Cosmetic avatar chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    pub avatar_class: String,
    pub avatar_image: String,
    pub name: String,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub avatar: Option<Avatar>,
    pub level: i32,
    pub xp: i64,
    pub gold: i64,
    pub hp: i32,
    pub max_hp: i32,
    pub streak: i32,
    pub last_quest_date: Option<CalendarDate>,
    pub badges: Vec<String>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let avatar = user.avatar();
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            avatar,
            level: user.level,
            xp: user.xp,
            gold: user.gold,
            hp: user.hp,
            max_hp: user.max_hp,
            streak: user.streak,
            last_quest_date: user.last_quest_date,
            badges: user.badges,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// New progression values written when a quest is completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionUpdate {
    pub xp: i64,
    pub gold: i64,
    pub level: i32,
    pub streak: i32,
    pub last_quest_date: CalendarDate,
}

/// One row of the public leaderboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub level: i32,
    pub xp: i64,
    pub avatar_image: Option<String>,
}
