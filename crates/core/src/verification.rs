//! Verification evidence attached to quests.
//!
//! Two kinds of evidence exist:
//!
//! - **Photo**: raw image bytes stored verbatim as an attestation record.
//!   No content checks are performed.
//! - **Quiz**: a fixed self-assessment quiz built from the user's notes.
//!   Answers may be scored later, but the completion gate only looks at
//!   whether evidence is present (see [`gate_satisfied`]).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

pub const VERIFICATION_NONE: &str = "none";
pub const VERIFICATION_PHOTO: &str = "photo";
pub const VERIFICATION_QUIZ: &str = "quiz";

/// How a quest is (or is not) verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationKind {
    None,
    Photo,
    Quiz,
}

impl VerificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => VERIFICATION_NONE,
            Self::Photo => VERIFICATION_PHOTO,
            Self::Quiz => VERIFICATION_QUIZ,
        }
    }

    /// Parse the `verification_type` column value.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            VERIFICATION_NONE => Ok(Self::None),
            VERIFICATION_PHOTO => Ok(Self::Photo),
            VERIFICATION_QUIZ => Ok(Self::Quiz),
            other => Err(CoreError::Validation(format!(
                "Unknown verification type '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Quiz content
// ---------------------------------------------------------------------------

/// Minimum number of correct answers for a quiz to count as passed.
pub const QUIZ_PASS_SCORE: u32 = 2;

/// A stored quiz question, including the index of the expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

/// A quiz question as shown to the user: the expected answer is withheld.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicQuizQuestion {
    pub question: String,
    pub options: Vec<String>,
}

impl From<&QuizQuestion> for PublicQuizQuestion {
    fn from(q: &QuizQuestion) -> Self {
        Self {
            question: q.question.clone(),
            options: q.options.clone(),
        }
    }
}

const STATIC_QUIZ: &[(&str, [&str; 4])] = &[
    (
        "Did you complete the task honestly?",
        ["Yes", "No", "Partially", "Skipped"],
    ),
    (
        "Did you understand what you worked on?",
        ["Yes", "Somewhat", "No", "Not sure"],
    ),
    (
        "Would you repeat this task tomorrow?",
        ["Yes", "Maybe", "No", "Not sure"],
    ),
];

/// The fixed self-assessment quiz. The first option is always the expected one.
pub fn static_quiz() -> Vec<QuizQuestion> {
    STATIC_QUIZ
        .iter()
        .map(|(question, options)| QuizQuestion {
            question: (*question).to_string(),
            options: options.iter().map(|o| (*o).to_string()).collect(),
            correct_answer: 0,
        })
        .collect()
}

/// Outcome of scoring a set of quiz answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizScore {
    pub score: u32,
    pub total: u32,
    pub passed: bool,
}

/// Score answers positionally against the stored questions.
///
/// Unanswered (`None`), missing, or out-of-range answers count as wrong.
/// Supplying more answers than there are questions is a validation error.
pub fn score_quiz(
    questions: &[QuizQuestion],
    answers: &[Option<usize>],
) -> Result<QuizScore, CoreError> {
    if answers.len() > questions.len() {
        return Err(CoreError::Validation(format!(
            "Expected at most {} answers, got {}",
            questions.len(),
            answers.len()
        )));
    }

    let score = questions
        .iter()
        .zip(answers)
        .filter(|(q, a)| **a == Some(q.correct_answer))
        .count() as u32;

    Ok(QuizScore {
        score,
        total: questions.len() as u32,
        passed: score >= QUIZ_PASS_SCORE,
    })
}

// ---------------------------------------------------------------------------
// Stored evidence
// ---------------------------------------------------------------------------

/// Contents of the `verification_data` JSONB column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerificationData {
    Photo {
        content_type: Option<String>,
        size_bytes: u64,
    },
    Quiz {
        notes: String,
        questions: Vec<QuizQuestion>,
        passed: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        score: Option<u32>,
    },
}

impl VerificationData {
    pub fn kind(&self) -> VerificationKind {
        match self {
            Self::Photo { .. } => VerificationKind::Photo,
            Self::Quiz { .. } => VerificationKind::Quiz,
        }
    }

    /// Record a quiz score. Photo evidence has nothing to score.
    pub fn with_quiz_score(self, result: QuizScore) -> Result<Self, CoreError> {
        match self {
            Self::Quiz {
                notes, questions, ..
            } => Ok(Self::Quiz {
                notes,
                questions,
                passed: result.passed,
                score: Some(result.score),
            }),
            Self::Photo { .. } => Err(CoreError::Conflict(
                "Quest is verified by photo; there is no quiz to submit".into(),
            )),
        }
    }
}

/// Whether attached evidence opens the completion gate.
///
/// Presence alone is sufficient: a quiz that was never answered, or was
/// answered wrongly, still satisfies the gate.
pub fn gate_satisfied(data: Option<&VerificationData>) -> bool {
    data.is_some()
}

// ---------------------------------------------------------------------------
// Submissions
// ---------------------------------------------------------------------------

/// Evidence submitted by a user for one of their quests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evidence {
    Photo {
        bytes: Vec<u8>,
        content_type: Option<String>,
    },
    Quiz {
        notes: String,
    },
}

/// Evidence normalised into what gets persisted on the quest row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceRecord {
    pub kind: VerificationKind,
    pub data: VerificationData,
    /// Raw photo bytes, stored in their own column.
    pub photo: Option<Vec<u8>>,
}

impl Evidence {
    pub fn kind(&self) -> VerificationKind {
        match self {
            Self::Photo { .. } => VerificationKind::Photo,
            Self::Quiz { .. } => VerificationKind::Quiz,
        }
    }

    /// Validate the submission and build the record to persist.
    ///
    /// `max_photo_bytes` bounds the accepted photo size.
    pub fn into_record(self, max_photo_bytes: usize) -> Result<EvidenceRecord, CoreError> {
        match self {
            Self::Photo {
                bytes,
                content_type,
            } => {
                if bytes.is_empty() {
                    return Err(CoreError::Validation("photo must not be empty".into()));
                }
                if bytes.len() > max_photo_bytes {
                    return Err(CoreError::Validation(format!(
                        "photo exceeds the {max_photo_bytes} byte limit"
                    )));
                }
                Ok(EvidenceRecord {
                    kind: VerificationKind::Photo,
                    data: VerificationData::Photo {
                        content_type,
                        size_bytes: bytes.len() as u64,
                    },
                    photo: Some(bytes),
                })
            }
            Self::Quiz { notes } => {
                if notes.trim().is_empty() {
                    return Err(CoreError::Validation("notes must not be empty".into()));
                }
                Ok(EvidenceRecord {
                    kind: VerificationKind::Quiz,
                    data: VerificationData::Quiz {
                        notes,
                        questions: static_quiz(),
                        passed: false,
                        score: None,
                    },
                    photo: None,
                })
            }
        }
    }
}
