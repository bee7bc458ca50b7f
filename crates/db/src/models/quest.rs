//! Quest entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use questlog_core::quest::QuestStatus;
use questlog_core::types::{DbId, Timestamp};
use questlog_core::verification::{VerificationData, VerificationKind};

/// A quest row from the `quests` table, without the raw photo bytes.
#[derive(Debug, Clone, FromRow)]
pub struct Quest {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub quest_type: String,
    pub difficulty: String,
    pub xp_reward: i64,
    pub gold_reward: i64,
    pub category: String,
    pub status_id: i16,
    pub verification_required: bool,
    pub verification_type: String,
    pub verification_data: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

impl Quest {
    /// Decode `status_id`. Unknown ids are a schema mismatch and surface as `None`.
    pub fn status(&self) -> Option<QuestStatus> {
        QuestStatus::from_id(self.status_id)
    }

    /// Decode the `verification_data` column.
    pub fn verification(&self) -> Result<Option<VerificationData>, serde_json::Error> {
        self.verification_data
            .clone()
            .map(serde_json::from_value)
            .transpose()
    }
}

/// External-facing quest representation.
///
/// Verification payloads are summarised rather than echoed, so stored quiz
/// answers never leave the server.
#[derive(Debug, Clone, Serialize)]
pub struct QuestResponse {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub quest_type: String,
    pub difficulty: String,
    pub xp_reward: i64,
    pub gold_reward: i64,
    pub category: String,
    pub status: &'static str,
    pub verification_required: bool,
    pub verification_type: VerificationKind,
    pub verification_submitted: bool,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

impl From<Quest> for QuestResponse {
    fn from(quest: Quest) -> Self {
        let status = quest.status().map_or("unknown", QuestStatus::as_str);
        let verification_type =
            VerificationKind::parse(&quest.verification_type).unwrap_or(VerificationKind::None);
        Self {
            id: quest.id,
            user_id: quest.user_id,
            title: quest.title,
            description: quest.description,
            quest_type: quest.quest_type,
            difficulty: quest.difficulty,
            xp_reward: quest.xp_reward,
            gold_reward: quest.gold_reward,
            category: quest.category,
            status,
            verification_required: quest.verification_required,
            verification_type,
            verification_submitted: quest.verification_data.is_some(),
            created_at: quest.created_at,
            completed_at: quest.completed_at,
        }
    }
}

/// DTO for creating a new quest.
#[derive(Debug, Clone)]
pub struct CreateQuest {
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub quest_type: String,
    pub difficulty: String,
    pub xp_reward: i64,
    pub gold_reward: i64,
    pub category: String,
}

impl CreateQuest {
    pub fn from_draft(user_id: DbId, draft: questlog_core::quest::QuestDraft) -> Self {
        Self {
            user_id,
            title: draft.title,
            description: draft.description,
            quest_type: draft.quest_type,
            difficulty: draft.difficulty,
            xp_reward: draft.xp_reward,
            gold_reward: draft.gold_reward,
            category: draft.category,
        }
    }
}
