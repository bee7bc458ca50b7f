//! Handlers for the `/verification` resource (photo upload, quiz).
//!
//! Evidence can only be attached while a quest is active. Attaching any
//! evidence marks the quest as requiring verification and immediately
//! satisfies that requirement.

use axum::extract::{Multipart, State};
use axum::Json;
use questlog_core::error::CoreError;
use questlog_core::quest::check_verifiable;
use questlog_core::types::DbId;
use questlog_core::verification::{score_quiz, Evidence, PublicQuizQuestion, VerificationData};
use questlog_db::models::quest::Quest;
use questlog_db::repositories::QuestRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Acknowledgement returned after photo evidence is stored.
#[derive(Debug, Serialize)]
pub struct PhotoSubmitted {
    pub message: &'static str,
    pub quest_id: DbId,
    pub size_bytes: usize,
}

/// Query parameters for `POST /verification/quiz/generate`.
#[derive(Debug, Deserialize)]
pub struct QuizGenerateParams {
    pub quest_id: DbId,
    pub notes: String,
}

/// Questions shown to the user, without their expected answers.
#[derive(Debug, Serialize)]
pub struct QuizGenerated {
    pub questions: Vec<PublicQuizQuestion>,
}

/// A single submitted answer: an option index, or its textual form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnswerInput {
    Index(usize),
    Text(String),
}

impl AnswerInput {
    /// The option index this answer selects, if it names one.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(i) => Some(*i),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Request body for `POST /verification/quiz/submit`.
#[derive(Debug, Deserialize)]
pub struct QuizSubmitRequest {
    pub quest_id: DbId,
    pub answers: Vec<Option<AnswerInput>>,
}

/// Result of scoring a quiz submission.
#[derive(Debug, Serialize)]
pub struct QuizResult {
    pub passed: bool,
    pub score: u32,
    pub total: u32,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load an owned quest and make sure its evidence may still change.
async fn load_verifiable(state: &AppState, user_id: DbId, quest_id: DbId) -> AppResult<Quest> {
    let quest = QuestRepo::find_owned(&state.pool, quest_id, user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Quest", quest_id))?;

    let status = quest.status().ok_or_else(|| {
        AppError::InternalError(format!(
            "Quest {quest_id} has unknown status id {}",
            quest.status_id
        ))
    })?;
    check_verifiable(quest_id, status)?;

    Ok(quest)
}

/// Persist evidence, reporting a conflict if the quest completed meanwhile.
async fn attach(
    state: &AppState,
    user_id: DbId,
    quest_id: DbId,
    evidence: Evidence,
) -> AppResult<VerificationData> {
    let record = evidence.into_record(state.config.max_photo_bytes)?;

    QuestRepo::attach_evidence(&state.pool, quest_id, user_id, &record)
        .await?
        .ok_or_else(|| {
            CoreError::Conflict(format!(
                "Quest {quest_id} is already completed; verification can no longer change"
            ))
        })?;

    Ok(record.data)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/verification/photo
///
/// Multipart form with a `quest_id` text field and a `photo` file field.
/// The bytes are stored verbatim; no image processing is done.
pub async fn submit_photo(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<PhotoSubmitted>> {
    let mut quest_id: Option<DbId> = None;
    let mut photo: Option<(Vec<u8>, Option<String>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "quest_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let id = text.trim().parse::<DbId>().map_err(|_| {
                    AppError::BadRequest(format!("Invalid quest_id '{}'", text.trim()))
                })?;
                quest_id = Some(id);
            }
            "photo" => {
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                photo = Some((data.to_vec(), content_type));
            }
            _ => {}
        }
    }

    let quest_id =
        quest_id.ok_or_else(|| AppError::BadRequest("Missing required 'quest_id' field".into()))?;
    let (bytes, content_type) =
        photo.ok_or_else(|| AppError::BadRequest("Missing required 'photo' field".into()))?;
    let size_bytes = bytes.len();

    load_verifiable(&state, auth.user_id, quest_id).await?;
    attach(
        &state,
        auth.user_id,
        quest_id,
        Evidence::Photo {
            bytes,
            content_type,
        },
    )
    .await?;

    tracing::info!(user_id = auth.user_id, quest_id, size_bytes, "Photo verification stored");

    Ok(Json(PhotoSubmitted {
        message: "Photo verification submitted",
        quest_id,
        size_bytes,
    }))
}

/// POST /api/verification/quiz/generate?quest_id=&notes=
///
/// Attach the self-assessment quiz to a quest and return its questions.
pub async fn generate_quiz(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<QuizGenerateParams>,
) -> AppResult<Json<QuizGenerated>> {
    load_verifiable(&state, auth.user_id, params.quest_id).await?;

    let data = attach(
        &state,
        auth.user_id,
        params.quest_id,
        Evidence::Quiz {
            notes: params.notes,
        },
    )
    .await?;

    let questions = match &data {
        VerificationData::Quiz { questions, .. } => {
            questions.iter().map(PublicQuizQuestion::from).collect()
        }
        VerificationData::Photo { .. } => Vec::new(),
    };

    tracing::info!(
        user_id = auth.user_id,
        quest_id = params.quest_id,
        question_count = questions.len(),
        "Quiz verification attached",
    );

    Ok(Json(QuizGenerated { questions }))
}

/// POST /api/verification/quiz/submit
///
/// Score answers against the stored quiz and record the outcome. The score
/// is informational: completion only checks that a quiz was attached.
pub async fn submit_quiz(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<QuizSubmitRequest>,
) -> AppResult<Json<QuizResult>> {
    let quest = load_verifiable(&state, auth.user_id, input.quest_id).await?;

    let data = quest
        .verification()
        .map_err(|e| {
            AppError::InternalError(format!(
                "Corrupt verification data on quest {}: {e}",
                quest.id
            ))
        })?
        .ok_or_else(|| {
            CoreError::Conflict(format!("Quest {} has no quiz to answer", quest.id))
        })?;

    let VerificationData::Quiz { questions, .. } = &data else {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Quest {} is verified by photo; there is no quiz to answer",
            quest.id
        ))));
    };
    let answers: Vec<Option<usize>> = input
        .answers
        .iter()
        .map(|a| a.as_ref().and_then(AnswerInput::as_index))
        .collect();
    let result = score_quiz(questions, &answers)?;

    let expected = quest.verification_data.as_ref().ok_or_else(|| {
        AppError::InternalError(format!("Quest {} lost its verification data", quest.id))
    })?;
    let scored = serde_json::to_value(data.with_quiz_score(result)?)
        .map_err(|e| AppError::InternalError(format!("Failed to encode quiz result: {e}")))?;
    let recorded =
        QuestRepo::record_quiz_score(&state.pool, quest.id, auth.user_id, expected, &scored)
            .await?;
    if !recorded {
        return Err(CoreError::Conflict(format!(
            "Quest {} changed while the quiz was being scored",
            quest.id
        ))
        .into());
    }

    tracing::info!(
        user_id = auth.user_id,
        quest_id = quest.id,
        score = result.score,
        passed = result.passed,
        "Quiz answers scored",
    );

    Ok(Json(QuizResult {
        passed: result.passed,
        score: result.score,
        total: result.total,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_accept_numbers_and_numeric_strings() {
        let answers: Vec<Option<AnswerInput>> =
            serde_json::from_str(r#"[0, "1", " 2 ", "Yes", null]"#).unwrap();
        let indices: Vec<Option<usize>> = answers
            .iter()
            .map(|a| a.as_ref().and_then(AnswerInput::as_index))
            .collect();
        assert_eq!(indices, vec![Some(0), Some(1), Some(2), None, None]);
    }
}
