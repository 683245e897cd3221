//! Store wire shapes and the translation to and from the in-memory model.
//!
//! The store speaks snake_case for attempts and scoring. Every naming
//! translation happens in this module, one `to_wire`/`from_wire` pair per
//! entity, so the rest of the crate never sees a wire field name.

use serde::{Deserialize, Serialize};

use crate::model::{
    AnswerOutcome, AnswerPayload, AnswerValue, AttemptAnswer, AttemptResult, CorrectAnswer,
    Question, QuestionType,
};

// ---------------------------------------------------------------------------
// Attempt submission
// ---------------------------------------------------------------------------

/// One answer in the body of `POST /quizzes/{id}/attempt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireAttemptAnswer {
    pub question_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_choice_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_answer: Option<String>,
}

/// Request body for an attempt submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptSubmission {
    pub answers: Vec<WireAttemptAnswer>,
}

impl AttemptSubmission {
    pub fn to_wire(answers: &[AttemptAnswer]) -> Self {
        Self {
            answers: answers.iter().map(AttemptAnswer::to_wire).collect(),
        }
    }
}

impl AttemptAnswer {
    pub fn to_wire(&self) -> WireAttemptAnswer {
        match &self.response {
            AnswerPayload::Selected(ids) => WireAttemptAnswer {
                question_id: self.question_id.clone(),
                selected_choice_ids: Some(ids.clone()),
                text_answer: None,
            },
            AnswerPayload::Text(text) => WireAttemptAnswer {
                question_id: self.question_id.clone(),
                selected_choice_ids: None,
                text_answer: Some(text.clone()),
            },
        }
    }

    /// Selections win when both fields are present; `None` when neither is.
    pub fn from_wire(wire: WireAttemptAnswer) -> Option<Self> {
        let response = match (wire.selected_choice_ids, wire.text_answer) {
            (Some(ids), _) => AnswerPayload::Selected(ids),
            (None, Some(text)) => AnswerPayload::Text(text),
            (None, None) => return None,
        };
        Some(Self {
            question_id: wire.question_id,
            response,
        })
    }
}

// ---------------------------------------------------------------------------
// Scoring response
// ---------------------------------------------------------------------------

/// The store's scored attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResponse {
    pub attempt_id: String,
    pub quiz_id: String,
    pub score: u32,
    pub max_score: u32,
    #[serde(default)]
    pub answers: Vec<ScoredAnswer>,
}

/// Outcome for a single question inside a [`ScoringResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAnswer {
    pub question_id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub is_correct: bool,
    pub max_points: u32,
    pub points_awarded: u32,
    #[serde(default)]
    pub correct_choice_ids: Vec<String>,
    #[serde(default)]
    pub correct_choice_texts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_choice_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_answer: Option<String>,
}

impl AttemptResult {
    /// Translate a scoring response into a displayable result whose
    /// questions are placeholders: id, type and points, no text.
    pub fn from_wire(response: ScoringResponse) -> Self {
        let quiz_id = response.quiz_id;
        let answers = response
            .answers
            .into_iter()
            .map(|scored| AnswerOutcome::from_wire(scored, &quiz_id))
            .collect();

        Self {
            attempt_id: response.attempt_id,
            quiz_id,
            score: response.score,
            total_points: response.max_score,
            answers,
        }
    }
}

impl AnswerOutcome {
    pub fn from_wire(scored: ScoredAnswer, quiz_id: &str) -> Self {
        let user_answer = match (scored.selected_choice_ids, scored.text_answer) {
            (Some(ids), _) if !ids.is_empty() => AnswerValue::List(ids),
            (_, Some(text)) if !text.is_empty() => AnswerValue::Single(text),
            _ => AnswerValue::Single(String::new()),
        };
        let correct_answer = if scored.correct_choice_texts.is_empty() {
            AnswerValue::List(scored.correct_choice_ids)
        } else {
            AnswerValue::List(scored.correct_choice_texts)
        };

        Self {
            question: Question {
                id: scored.question_id.clone(),
                quiz_id: quiz_id.to_string(),
                question_type: scored.question_type,
                text: String::new(),
                choices: None,
                correct_answer: None,
                points: scored.max_points,
            },
            question_id: scored.question_id,
            user_answer,
            correct_answer,
            points_earned: scored.points_awarded,
            is_correct: scored.is_correct,
        }
    }
}

// ---------------------------------------------------------------------------
// Authoring payloads
// ---------------------------------------------------------------------------

/// A choice in the authoring UI's shape, passed through unchanged for
/// single and multi-choice questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthoredChoice {
    pub text: String,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}

/// A True/False choice with the store's flag naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggedChoice {
    pub text: String,
    pub is_correct: bool,
}

/// The choice list of a question payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadChoices {
    Authored(Vec<AuthoredChoice>),
    Flagged(Vec<FlaggedChoice>),
}

/// Body for creating or updating a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub text: String,
    pub points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<PayloadChoices>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<CorrectAnswer>,
}

/// Body for creating a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuiz {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub published: bool,
}

/// Partial update of a quiz. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}
