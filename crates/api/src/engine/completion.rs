//! Transactional quest completion and reward application.
//!
//! Rows are locked in a fixed order (quest, then user) so two requests can
//! never deadlock against each other. The quest status flip is conditional
//! on the row still being active, which makes a second completion of the
//! same quest observe a conflict instead of paying out twice.

use questlog_core::error::CoreError;
use questlog_core::progression::{apply_rewards, Progression};
use questlog_core::quest::{check_completable, QuestGate};
use questlog_core::types::{CalendarDate, DbId};
use questlog_core::verification::gate_satisfied;
use questlog_db::models::user::ProgressionUpdate;
use questlog_db::repositories::{QuestRepo, UserRepo};
use questlog_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// What a successful completion changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionOutcome {
    pub xp_gained: i64,
    pub gold_gained: i64,
    pub new_level: i32,
    pub level_up: bool,
    pub new_streak: i32,
}

/// Complete `quest_id` for `user_id`, crediting rewards as of `today`.
///
/// Errors:
/// - `NotFound` if the quest does not exist or belongs to someone else.
/// - `Conflict` if the quest is already completed or still needs evidence.
/// - `NotFound` if the owning user row has vanished.
///
/// Nothing is written unless every step succeeds.
pub async fn complete_quest(
    pool: &DbPool,
    user_id: DbId,
    quest_id: DbId,
    today: CalendarDate,
) -> AppResult<CompletionOutcome> {
    let mut tx = pool.begin().await?;

    let quest = QuestRepo::lock_owned(&mut *tx, quest_id, user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Quest", quest_id))?;

    let status = quest.status().ok_or_else(|| {
        AppError::InternalError(format!(
            "Quest {quest_id} has unknown status id {}",
            quest.status_id
        ))
    })?;
    let verification = quest.verification().map_err(|e| {
        AppError::InternalError(format!("Corrupt verification data on quest {quest_id}: {e}"))
    })?;

    check_completable(
        quest_id,
        QuestGate {
            status,
            verification_required: quest.verification_required,
            has_verification_data: gate_satisfied(verification.as_ref()),
        },
    )?;

    let completed = QuestRepo::mark_completed(&mut *tx, quest_id)
        .await?
        .ok_or_else(|| CoreError::Conflict(format!("Quest {quest_id} is already completed")))?;

    let user = UserRepo::lock_by_id(&mut *tx, user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", user_id))?;

    let current = Progression {
        level: user.level,
        xp: user.xp,
        gold: user.gold,
        streak: user.streak,
        last_quest_date: user.last_quest_date,
    };
    let outcome = apply_rewards(&current, completed.xp_reward, completed.gold_reward, today);
    let next = outcome.progression;

    UserRepo::apply_progression(
        &mut *tx,
        user_id,
        &ProgressionUpdate {
            xp: next.xp,
            gold: next.gold,
            level: next.level,
            streak: next.streak,
            last_quest_date: today,
        },
    )
    .await?
    .ok_or_else(|| CoreError::not_found("User", user_id))?;

    tx.commit().await?;

    let result = CompletionOutcome {
        xp_gained: next.xp - current.xp,
        gold_gained: next.gold - current.gold,
        new_level: next.level,
        level_up: outcome.level_up,
        new_streak: next.streak,
    };

    tracing::info!(
        user_id,
        quest_id,
        xp_gained = result.xp_gained,
        gold_gained = result.gold_gained,
        new_level = result.new_level,
        level_up = result.level_up,
        new_streak = result.new_streak,
        "Quest completed",
    );

    Ok(result)
}
