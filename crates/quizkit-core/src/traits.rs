//! The quiz store collaborator.
//!
//! The store owns quizzes and questions and scores attempts. It is
//! implemented over HTTP by `quizkit-store`; the session layer only sees
//! this trait.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{AttemptAnswer, Question, Quiz};
use crate::wire::{NewQuestion, NewQuiz, QuizPatch, ScoringResponse};

/// Which view of the store a read targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Published quizzes only, as anonymous takers see them.
    Published,
    /// Every quiz, as administrators see them.
    Admin,
}

/// Trait for quiz stores.
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Human-readable store name (e.g. "http").
    fn name(&self) -> &str;

    /// List quizzes. Listings may omit embedded questions.
    async fn list_quizzes(&self, scope: Scope) -> Result<Vec<Quiz>, StoreError>;

    /// Fetch one quiz with its ordered questions.
    async fn get_quiz(&self, scope: Scope, quiz_id: &str) -> Result<Quiz, StoreError>;

    async fn create_quiz(&self, quiz: &NewQuiz) -> Result<Quiz, StoreError>;

    async fn update_quiz(&self, quiz_id: &str, patch: &QuizPatch) -> Result<Quiz, StoreError>;

    async fn delete_quiz(&self, quiz_id: &str) -> Result<(), StoreError>;

    async fn create_question(
        &self,
        quiz_id: &str,
        question: &NewQuestion,
    ) -> Result<Question, StoreError>;

    async fn update_question(
        &self,
        question_id: &str,
        question: &NewQuestion,
    ) -> Result<Question, StoreError>;

    async fn delete_question(&self, question_id: &str) -> Result<(), StoreError>;

    /// Submit an attempt and receive the store's scoring.
    async fn submit_attempt(
        &self,
        quiz_id: &str,
        answers: &[AttemptAnswer],
    ) -> Result<ScoringResponse, StoreError>;
}

/// Locate a question by id across all quizzes.
///
/// The store has no direct question lookup, so this scans the admin listing
/// and returns the owning quiz's id alongside the question.
pub async fn find_question(
    store: &dyn QuizStore,
    question_id: &str,
) -> Result<(String, Question), StoreError> {
    let quizzes = store.list_quizzes(Scope::Admin).await?;

    for quiz in quizzes {
        if let Some(question) = quiz
            .question_list()
            .iter()
            .find(|q| q.id == question_id)
        {
            let mut question = question.clone();
            question.quiz_id.clone_from(&quiz.id);
            return Ok((quiz.id.clone(), question));
        }
    }

    Err(StoreError::NotFound(format!("question {question_id}")))
}
