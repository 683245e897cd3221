//! Error types for quizkit.
//!
//! `ValidationError` covers everything the core can reject before a request
//! leaves the process. `StoreError` represents failures talking to the quiz
//! store; it is defined here so the session layer can classify store failures
//! without depending on the HTTP crate.

use thiserror::Error;

/// Rejections raised while encoding answers or authoring forms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A question has no usable answer at submission time.
    #[error("{}", missing_answer_message(.question_type, .question))]
    MissingAnswer {
        question_id: String,
        question: String,
        question_type: crate::model::QuestionType,
    },

    /// No choice is flagged correct on a type that requires one.
    #[error("at least one choice must be marked as correct")]
    NoCorrectChoice,

    /// More than one choice flagged on a True/False question.
    #[error("exactly one choice must be marked as correct")]
    MultipleCorrectChoices,

    /// A True/False question without exactly two choices.
    #[error("True/False questions must have exactly {expected} choices, found {found}")]
    InvalidChoiceCount { expected: usize, found: usize },

    /// A choice question with fewer than two choices.
    #[error("at least 2 choices are required for MCQ questions, found {found}")]
    TooFewChoices { found: usize },

    #[error("question text is required")]
    EmptyText,

    #[error("points must be at least 1")]
    InvalidPoints,

    #[error("title is required")]
    EmptyTitle,

    #[error("description is required")]
    EmptyDescription,
}

fn missing_answer_message(question_type: &crate::model::QuestionType, question: &str) -> String {
    use crate::model::QuestionType;
    match question_type {
        QuestionType::Text => format!("Please answer: {question}"),
        QuestionType::McqSingle | QuestionType::TrueFalse => {
            format!("Please select an answer for: {question}")
        }
        QuestionType::McqMulti => format!("Please select at least one answer for: {question}"),
    }
}

/// Errors that can occur when talking to the quiz store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced quiz or question does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The store could not be reached.
    #[error("network error: {0}")]
    NetworkFailure(String),

    /// The store answered with an error status.
    #[error("store error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The store answered with a body we could not decode.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl StoreError {
    /// Returns `true` for failures that should end the page rather than
    /// be shown as a banner.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
