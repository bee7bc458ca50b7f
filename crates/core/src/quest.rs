//! Quest lifecycle rules (state machine, reward validation, fallback quests).
//!
//! A quest starts `active` and moves to `completed` exactly once. The only
//! other mutation is attaching verification evidence, which is allowed
//! while the quest is still active.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Quest lifecycle status.
///
/// Discriminants match the seed order of the `quest_statuses` lookup table.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    Active = 1,
    Completed = 2,
}

impl QuestStatus {
    /// Return the database status ID.
    pub fn id(self) -> i16 {
        self as i16
    }

    /// Map a database status ID back to the enum.
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(Self::Active),
            2 => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

pub const DIFFICULTY_EASY: &str = "easy";
pub const DIFFICULTY_MEDIUM: &str = "medium";
pub const DIFFICULTY_HARD: &str = "hard";

/// All accepted difficulty labels.
pub const VALID_DIFFICULTIES: &[&str] = &[DIFFICULTY_EASY, DIFFICULTY_MEDIUM, DIFFICULTY_HARD];

/// Validate that a difficulty string is one of the accepted values.
pub fn validate_difficulty(difficulty: &str) -> Result<(), CoreError> {
    if VALID_DIFFICULTIES.contains(&difficulty) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid difficulty '{difficulty}'. Must be one of: {}",
            VALID_DIFFICULTIES.join(", ")
        )))
    }
}

/// Validate reward amounts: xp must be positive, gold must not be negative.
pub fn validate_rewards(xp_reward: i64, gold_reward: i64) -> Result<(), CoreError> {
    if xp_reward <= 0 {
        return Err(CoreError::Validation(
            "xp_reward must be a positive integer".into(),
        ));
    }
    if gold_reward < 0 {
        return Err(CoreError::Validation(
            "gold_reward must not be negative".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

/// Everything needed to create a quest, before it has an owner or an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestDraft {
    pub title: String,
    pub description: String,
    pub quest_type: String,
    pub difficulty: String,
    pub xp_reward: i64,
    pub gold_reward: i64,
    pub category: String,
}

impl QuestDraft {
    /// Check required text fields, difficulty, and rewards.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation("title must not be empty".into()));
        }
        if self.category.trim().is_empty() {
            return Err(CoreError::Validation("category must not be empty".into()));
        }
        validate_difficulty(&self.difficulty)?;
        validate_rewards(self.xp_reward, self.gold_reward)
    }
}

/// Category used when the caller does not name one.
pub const DEFAULT_CATEGORY: &str = "productivity";

/// Quest type assigned to generated quests.
pub const GENERATED_QUEST_TYPE: &str = "daily";

/// Xp granted by a generated quest.
pub const GENERATED_XP_REWARD: i64 = 100;

/// Gold granted by a generated quest.
pub const GENERATED_GOLD_REWARD: i64 = 25;

/// Deterministic stand-in for content generation: one medium daily quest
/// for the requested category.
pub fn fallback_quest(category: &str) -> QuestDraft {
    let category = category.trim();
    let category = if category.is_empty() {
        DEFAULT_CATEGORY
    } else {
        category
    };

    QuestDraft {
        title: format!("{} Challenge", title_case(category)),
        description: format!("Complete one meaningful {category} task today."),
        quest_type: GENERATED_QUEST_TYPE.to_string(),
        difficulty: DIFFICULTY_MEDIUM.to_string(),
        xp_reward: GENERATED_XP_REWARD,
        gold_reward: GENERATED_GOLD_REWARD,
        category: category.to_string(),
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// The slice of a quest the state machine needs to make a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestGate {
    pub status: QuestStatus,
    pub verification_required: bool,
    pub has_verification_data: bool,
}

/// Decide whether a quest may transition `active -> completed`.
///
/// The verification check is presence-based: any attached evidence opens
/// the gate, including a quiz whose `passed` flag is still `false`.
pub fn check_completable(quest_id: DbId, gate: QuestGate) -> Result<(), CoreError> {
    if gate.status != QuestStatus::Active {
        return Err(CoreError::Conflict(format!(
            "Quest {quest_id} is already completed"
        )));
    }
    if gate.verification_required && !gate.has_verification_data {
        return Err(CoreError::Conflict(format!(
            "Quest {quest_id} requires verification before it can be completed"
        )));
    }
    Ok(())
}

/// Decide whether verification evidence may be attached to a quest.
pub fn check_verifiable(quest_id: DbId, status: QuestStatus) -> Result<(), CoreError> {
    match status {
        QuestStatus::Active => Ok(()),
        QuestStatus::Completed => Err(CoreError::Conflict(format!(
            "Quest {quest_id} is already completed; verification can no longer change"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn draft() -> QuestDraft {
        QuestDraft {
            title: "Read a chapter".into(),
            description: "Any book".into(),
            quest_type: "daily".into(),
            difficulty: "easy".into(),
            xp_reward: 50,
            gold_reward: 10,
            category: "learning".into(),
        }
    }

    #[test]
    fn status_ids_round_trip() {
        assert_eq!(QuestStatus::from_id(QuestStatus::Active.id()), Some(QuestStatus::Active));
        assert_eq!(QuestStatus::from_id(2), Some(QuestStatus::Completed));
        assert_eq!(QuestStatus::from_id(9), None);
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn zero_xp_reward_rejected() {
        let mut d = draft();
        d.xp_reward = 0;
        assert_matches!(d.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn negative_gold_rejected() {
        let mut d = draft();
        d.gold_reward = -1;
        assert_matches!(d.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn zero_gold_allowed() {
        let mut d = draft();
        d.gold_reward = 0;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn unknown_difficulty_rejected() {
        let mut d = draft();
        d.difficulty = "legendary".into();
        let err = d.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid difficulty"));
    }

    #[test]
    fn blank_title_rejected() {
        let mut d = draft();
        d.title = "   ".into();
        assert_matches!(d.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn fallback_quest_uses_category() {
        let quest = fallback_quest("fitness");
        assert_eq!(quest.title, "Fitness Challenge");
        assert_eq!(quest.description, "Complete one meaningful fitness task today.");
        assert_eq!(quest.difficulty, "medium");
        assert_eq!(quest.xp_reward, 100);
        assert_eq!(quest.gold_reward, 25);
        assert_eq!(quest.quest_type, "daily");
        assert!(quest.validate().is_ok());
    }

    #[test]
    fn fallback_quest_title_cases_each_word() {
        assert_eq!(fallback_quest("deep WORK").title, "Deep Work Challenge");
    }

    #[test]
    fn fallback_quest_defaults_blank_category() {
        assert_eq!(fallback_quest("  ").category, DEFAULT_CATEGORY);
    }

    #[test]
    fn active_quest_without_verification_is_completable() {
        let gate = QuestGate {
            status: QuestStatus::Active,
            verification_required: false,
            has_verification_data: false,
        };
        assert!(check_completable(1, gate).is_ok());
    }

    #[test]
    fn completed_quest_conflicts() {
        let gate = QuestGate {
            status: QuestStatus::Completed,
            verification_required: false,
            has_verification_data: false,
        };
        assert_matches!(check_completable(1, gate), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn missing_verification_conflicts() {
        let gate = QuestGate {
            status: QuestStatus::Active,
            verification_required: true,
            has_verification_data: false,
        };
        let err = check_completable(7, gate).unwrap_err();
        assert!(err.to_string().contains("requires verification"));
    }

    #[test]
    fn attached_verification_opens_gate() {
        let gate = QuestGate {
            status: QuestStatus::Active,
            verification_required: true,
            has_verification_data: true,
        };
        assert!(check_completable(7, gate).is_ok());
    }

    #[test]
    fn completed_quest_rejects_new_evidence() {
        assert!(check_verifiable(3, QuestStatus::Active).is_ok());
        assert_matches!(
            check_verifiable(3, QuestStatus::Completed),
            Err(CoreError::Conflict(_))
        );
    }
}
