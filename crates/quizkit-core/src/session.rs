//! Taking and authoring flows.
//!
//! Each flow wires the pure core functions to a [`QuizStore`]. Network
//! failures surface immediately; nothing is retried.

use std::sync::Arc;

use thiserror::Error;

use crate::attempt::{assemble, initial_drafts, DraftAnswers};
use crate::error::{StoreError, ValidationError};
use crate::form::{QuestionForm, QuizForm};
use crate::handoff::ResultSlot;
use crate::model::{AttemptResult, Question, Quiz};
use crate::reconcile::reconcile_response;
use crate::traits::{find_question, QuizStore, Scope};
use crate::wire::{QuizPatch, ScoringResponse};

/// Errors surfaced by the taking and authoring flows.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The result was already displayed, or nothing was submitted.
    #[error("No quiz results found. Please take the quiz first.")]
    NoResult,
}

/// One user's pass through a quiz: load, submit, view the result once.
pub struct TakingSession {
    store: Arc<dyn QuizStore>,
    results: ResultSlot<ScoringResponse>,
}

impl TakingSession {
    pub fn new(store: Arc<dyn QuizStore>) -> Self {
        Self {
            store,
            results: ResultSlot::new(),
        }
    }

    /// Fetch a published quiz and the empty drafts for its questions.
    pub async fn start(&self, quiz_id: &str) -> Result<(Quiz, DraftAnswers), SessionError> {
        let quiz = self.store.get_quiz(Scope::Published, quiz_id).await?;
        let drafts = initial_drafts(&quiz);
        tracing::info!(
            quiz_id = %quiz.id,
            questions = quiz.question_list().len(),
            "quiz loaded"
        );
        Ok((quiz, drafts))
    }

    /// Assemble and submit an attempt, keeping the scoring for [`Self::result`].
    ///
    /// Assembly failures are returned before anything is sent.
    pub async fn submit(&self, quiz: &Quiz, drafts: &DraftAnswers) -> Result<(), SessionError> {
        let answers = assemble(quiz, drafts)?;
        let response = self.store.submit_attempt(&quiz.id, &answers).await?;
        tracing::info!(
            quiz_id = %quiz.id,
            attempt_id = %response.attempt_id,
            score = response.score,
            max_score = response.max_score,
            "attempt scored"
        );
        self.results.put(response);
        Ok(())
    }

    /// Consume the submitted attempt's scoring and reconcile it for display.
    ///
    /// A second call returns [`SessionError::NoResult`]. If the quiz can no
    /// longer be fetched the result is shown without question text.
    pub async fn result(&self, quiz_id: &str) -> Result<AttemptResult, SessionError> {
        let response = self.results.take().ok_or(SessionError::NoResult)?;

        let quiz = match self.store.get_quiz(Scope::Published, quiz_id).await {
            Ok(quiz) => Some(quiz),
            Err(e) => {
                tracing::warn!(quiz_id, error = %e, "quiz fetch failed, showing result as-is");
                None
            }
        };

        Ok(reconcile_response(response, quiz.as_ref()))
    }

    /// Whether a submitted result is waiting to be displayed.
    pub fn has_pending_result(&self) -> bool {
        !self.results.is_empty()
    }
}

/// Administrator flows over quizzes and questions.
pub struct AuthoringSession {
    store: Arc<dyn QuizStore>,
}

impl AuthoringSession {
    pub fn new(store: Arc<dyn QuizStore>) -> Self {
        Self { store }
    }

    pub async fn create_quiz(&self, form: &QuizForm) -> Result<Quiz, SessionError> {
        let payload = form.encode()?;
        let quiz = self.store.create_quiz(&payload).await?;
        tracing::info!(quiz_id = %quiz.id, slug = %quiz.slug, "quiz created");
        Ok(quiz)
    }

    /// Load a quiz into an edit form.
    pub async fn edit_quiz(&self, quiz_id: &str) -> Result<QuizForm, SessionError> {
        let quiz = self.store.get_quiz(Scope::Admin, quiz_id).await?;
        Ok(QuizForm {
            title: quiz.title,
            description: quiz.description,
            published: quiz.published,
        })
    }

    pub async fn update_quiz(&self, quiz_id: &str, form: &QuizForm) -> Result<Quiz, SessionError> {
        let patch = form.encode_patch()?;
        Ok(self.store.update_quiz(quiz_id, &patch).await?)
    }

    pub async fn set_published(&self, quiz_id: &str, published: bool) -> Result<Quiz, SessionError> {
        let patch = QuizPatch {
            published: Some(published),
            ..Default::default()
        };
        Ok(self.store.update_quiz(quiz_id, &patch).await?)
    }

    pub async fn delete_quiz(&self, quiz_id: &str) -> Result<(), SessionError> {
        self.store.delete_quiz(quiz_id).await?;
        tracing::info!(quiz_id, "quiz deleted");
        Ok(())
    }

    pub async fn add_question(
        &self,
        quiz_id: &str,
        form: &QuestionForm,
    ) -> Result<Question, SessionError> {
        let payload = form.encode()?;
        let question = self.store.create_question(quiz_id, &payload).await?;
        tracing::info!(quiz_id, question_id = %question.id, "question added");
        Ok(question)
    }

    /// Load a question into an edit form, returning the owning quiz's id.
    pub async fn edit_question(
        &self,
        question_id: &str,
    ) -> Result<(String, QuestionForm), SessionError> {
        let (quiz_id, question) = find_question(self.store.as_ref(), question_id).await?;
        Ok((quiz_id, QuestionForm::decode(&question)))
    }

    pub async fn save_question(
        &self,
        question_id: &str,
        form: &QuestionForm,
    ) -> Result<Question, SessionError> {
        let payload = form.encode()?;
        Ok(self.store.update_question(question_id, &payload).await?)
    }

    pub async fn delete_question(&self, question_id: &str) -> Result<(), SessionError> {
        self.store.delete_question(question_id).await?;
        tracing::info!(question_id, "question deleted");
        Ok(())
    }
}
