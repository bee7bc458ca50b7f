//! Repository for the `quests` table.

use sqlx::{PgConnection, PgPool};
use questlog_core::quest::QuestStatus;
use questlog_core::types::DbId;
use questlog_core::verification::{EvidenceRecord, VerificationKind};

use crate::models::quest::{CreateQuest, Quest};

/// Column list shared across queries. `verification_photo` is deliberately
/// absent: photo bytes are only read through [`QuestRepo::find_photo`].
const COLUMNS: &str = "id, user_id, title, description, quest_type, difficulty, xp_reward, \
                        gold_reward, category, status_id, verification_required, \
                        verification_type, verification_data, created_at, updated_at, \
                        completed_at";

/// Maximum rows returned by the active-quest listing.
pub const ACTIVE_LIST_LIMIT: i64 = 100;

/// Maximum rows returned by the completed-quest listing.
pub const COMPLETED_LIST_LIMIT: i64 = 50;

/// Provides lifecycle operations for quests.
///
/// Every lookup is scoped by owner: a quest belonging to someone else is
/// indistinguishable from one that does not exist.
pub struct QuestRepo;

impl QuestRepo {
    /// Insert a new active quest, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateQuest) -> Result<Quest, sqlx::Error> {
        let query = format!(
            "INSERT INTO quests
                (user_id, title, description, quest_type, difficulty,
                 xp_reward, gold_reward, category, status_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quest>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.quest_type)
            .bind(&input.difficulty)
            .bind(input.xp_reward)
            .bind(input.gold_reward)
            .bind(&input.category)
            .bind(QuestStatus::Active.id())
            .fetch_one(pool)
            .await
    }

    /// Find a quest by ID, only if owned by `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Quest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quests WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Quest>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Raw photo evidence for an owned quest, if any was submitted.
    pub async fn find_photo(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Vec<u8>>, sqlx::Error> {
        let row: Option<(Option<Vec<u8>>,)> = sqlx::query_as(
            "SELECT verification_photo FROM quests WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.and_then(|(photo,)| photo))
    }

    /// Active quests for a user, oldest first.
    pub async fn list_active(pool: &PgPool, user_id: DbId) -> Result<Vec<Quest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quests
             WHERE user_id = $1 AND status_id = $2
             ORDER BY created_at ASC, id ASC
             LIMIT $3"
        );
        sqlx::query_as::<_, Quest>(&query)
            .bind(user_id)
            .bind(QuestStatus::Active.id())
            .bind(ACTIVE_LIST_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Completed quests for a user, most recently completed first.
    pub async fn list_completed(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Quest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quests
             WHERE user_id = $1 AND status_id = $2
             ORDER BY completed_at DESC, id DESC
             LIMIT $3"
        );
        sqlx::query_as::<_, Quest>(&query)
            .bind(user_id)
            .bind(QuestStatus::Completed.id())
            .bind(COMPLETED_LIST_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Count a user's quests in the given status.
    pub async fn count_by_status(
        pool: &PgPool,
        user_id: DbId,
        status: QuestStatus,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM quests WHERE user_id = $1 AND status_id = $2")
                .bind(user_id)
                .bind(status.id())
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Attach verification evidence and mark the quest as requiring it.
    ///
    /// The update only applies while the quest is still active. Returns the
    /// updated row, or `None` if no active quest matched.
    pub async fn attach_evidence(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        record: &EvidenceRecord,
    ) -> Result<Option<Quest>, sqlx::Error> {
        let data = serde_json::to_value(&record.data)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let query = format!(
            "UPDATE quests SET
                verification_required = true,
                verification_type = $3,
                verification_data = $4,
                verification_photo = $5
             WHERE id = $1 AND user_id = $2 AND status_id = $6
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quest>(&query)
            .bind(id)
            .bind(user_id)
            .bind(record.kind.as_str())
            .bind(data)
            .bind(record.photo.as_deref())
            .bind(QuestStatus::Active.id())
            .fetch_optional(pool)
            .await
    }

    /// Replace a quiz payload with its scored version.
    ///
    /// Acts as a compare-and-swap: the write only lands while the quest is
    /// active, still carries a quiz, and still holds `expected`. Returns
    /// `false` if any of that changed since the quiz was loaded.
    pub async fn record_quiz_score(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        expected: &serde_json::Value,
        scored: &serde_json::Value,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE quests SET verification_data = $3
             WHERE id = $1 AND user_id = $2
               AND status_id = $4
               AND verification_type = $5
               AND verification_data = $6",
        )
        .bind(id)
        .bind(user_id)
        .bind(scored)
        .bind(QuestStatus::Active.id())
        .bind(VerificationKind::Quiz.as_str())
        .bind(expected)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load an owned quest and take a row lock for the rest of the transaction.
    ///
    /// Concurrent completions of the same quest serialize on this lock.
    pub async fn lock_owned(
        conn: &mut PgConnection,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Quest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quests WHERE id = $1 AND user_id = $2 FOR UPDATE"
        );
        sqlx::query_as::<_, Quest>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(conn)
            .await
    }

    /// Flip an active quest to completed and stamp `completed_at`.
    ///
    /// Conditional on the quest still being active: returns `None` when the
    /// row was already completed, so callers can report a conflict.
    pub async fn mark_completed(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Quest>, sqlx::Error> {
        let query = format!(
            "UPDATE quests SET status_id = $2, completed_at = NOW()
             WHERE id = $1 AND status_id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quest>(&query)
            .bind(id)
            .bind(QuestStatus::Completed.id())
            .bind(QuestStatus::Active.id())
            .fetch_optional(conn)
            .await
    }
}
