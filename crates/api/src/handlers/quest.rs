//! Handlers for the `/quests` resource.
//!
//! All endpoints require authentication and only ever touch the caller's
//! own quests.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use questlog_core::quest::{fallback_quest, QuestDraft, DEFAULT_CATEGORY};
use questlog_core::types::DbId;
use questlog_db::models::quest::{CreateQuest, QuestResponse};
use questlog_db::repositories::QuestRepo;
use serde::Deserialize;

use crate::engine::completion::{complete_quest as run_completion, CompletionOutcome};
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::handlers::user::load_user;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /quests/create`.
#[derive(Debug, Deserialize)]
pub struct CreateQuestRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub quest_type: String,
    pub difficulty: String,
    pub xp_reward: i64,
    pub gold_reward: i64,
    pub category: String,
}

impl From<CreateQuestRequest> for QuestDraft {
    fn from(req: CreateQuestRequest) -> Self {
        Self {
            title: req.title.trim().to_string(),
            description: req.description,
            quest_type: req.quest_type,
            difficulty: req.difficulty.trim().to_lowercase(),
            xp_reward: req.xp_reward,
            gold_reward: req.gold_reward,
            category: req.category.trim().to_string(),
        }
    }
}

/// Query parameters for `POST /quests/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateQuestParams {
    pub category: Option<String>,
}

/// POST /api/quests/create
pub async fn create_quest(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateQuestRequest>,
) -> AppResult<(StatusCode, Json<QuestResponse>)> {
    let draft = QuestDraft::from(input);
    draft.validate()?;

    let input = CreateQuest::from_draft(auth.user_id, draft);
    let quest = QuestRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        quest_id = quest.id,
        difficulty = %quest.difficulty,
        xp_reward = quest.xp_reward,
        "Quest created",
    );

    Ok((StatusCode::CREATED, Json(quest.into())))
}

/// POST /api/quests/generate?category=
///
/// Create a quest from the static template for `category`
/// (default: `productivity`).
pub async fn generate_quest(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<GenerateQuestParams>,
) -> AppResult<(StatusCode, Json<QuestResponse>)> {
    let category = params.category.as_deref().unwrap_or(DEFAULT_CATEGORY);
    let draft = fallback_quest(category);

    let input = CreateQuest::from_draft(auth.user_id, draft);
    let quest = QuestRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        quest_id = quest.id,
        category = %quest.category,
        "Quest generated",
    );

    Ok((StatusCode::CREATED, Json(quest.into())))
}

/// GET /api/quests/active
pub async fn list_active(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<QuestResponse>>> {
    let quests = QuestRepo::list_active(&state.pool, auth.user_id).await?;
    Ok(Json(quests.into_iter().map(QuestResponse::from).collect()))
}

/// GET /api/quests/completed
///
/// Most recently completed first.
pub async fn list_completed(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<QuestResponse>>> {
    let quests = QuestRepo::list_completed(&state.pool, auth.user_id).await?;
    Ok(Json(quests.into_iter().map(QuestResponse::from).collect()))
}

/// POST /api/quests/{id}/complete
///
/// Complete an active quest and credit its rewards. The calendar day used
/// for streak tracking is the current UTC date.
pub async fn complete_quest(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(quest_id): Path<DbId>,
) -> AppResult<Json<CompletionOutcome>> {
    // Surface a deleted account as a 404 before touching the quest.
    load_user(&state, auth.user_id).await?;

    let today = Utc::now().date_naive();
    let outcome = run_completion(&state.pool, auth.user_id, quest_id, today).await?;
    Ok(Json(outcome))
}
