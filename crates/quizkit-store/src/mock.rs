//! In-memory quiz store for testing.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use quizkit_core::model::{AnswerPayload, AttemptAnswer, Choice, Question, QuestionType, Quiz};
use quizkit_core::traits::{QuizStore, Scope};
use quizkit_core::wire::{
    NewQuestion, NewQuiz, PayloadChoices, QuizPatch, ScoredAnswer, ScoringResponse,
};

use crate::error::StoreError;

/// A quiz store held in memory, for exercising sessions without a server.
///
/// Published reads hide unpublished quizzes, and published listings carry
/// a question count instead of the questions, as the real store does.
/// Attempts are scored by comparing selections against the flagged
/// choices and text answers case-insensitively.
#[derive(Default)]
pub struct MockQuizStore {
    quizzes: Mutex<Vec<Quiz>>,
    /// Makes every `get_quiz` fail with a network error.
    fail_quiz_fetch: AtomicBool,
    /// Number of trait calls made.
    call_count: AtomicU32,
    /// Answers of the last submitted attempt.
    last_submission: Mutex<Option<Vec<AttemptAnswer>>>,
}

impl MockQuizStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a quiz, assigning ids where missing.
    pub fn with_quiz(self, quiz: Quiz) -> Self {
        self.insert_quiz(quiz);
        self
    }

    /// Insert a quiz, returning its id.
    pub fn insert_quiz(&self, mut quiz: Quiz) -> String {
        if quiz.id.is_empty() {
            quiz.id = new_id();
        }
        if let Some(questions) = quiz.questions.as_mut() {
            for question in questions {
                if question.id.is_empty() {
                    question.id = new_id();
                }
                question.quiz_id.clone_from(&quiz.id);
            }
        }
        let id = quiz.id.clone();
        self.quizzes().push(quiz);
        id
    }

    /// Toggle failure of quiz fetches.
    pub fn fail_quiz_fetch(&self, fail: bool) {
        self.fail_quiz_fetch.store(fail, Ordering::Relaxed);
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_submission(&self) -> Option<Vec<AttemptAnswer>> {
        lock(&self.last_submission).clone()
    }

    fn quizzes(&self) -> MutexGuard<'_, Vec<Quiz>> {
        lock(&self.quizzes)
    }

    fn record_call(&self) {
        self.call_count.fetch_add(1, Ordering::Relaxed);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn visible(quiz: &Quiz, scope: Scope) -> bool {
    scope == Scope::Admin || quiz.published
}

fn quiz_not_found(quiz_id: &str) -> StoreError {
    StoreError::NotFound(format!("quiz {quiz_id}"))
}

fn question_not_found(question_id: &str) -> StoreError {
    StoreError::NotFound(format!("question {question_id}"))
}

/// Build a stored question from an authoring payload.
fn materialize(quiz_id: &str, question_id: String, payload: &NewQuestion) -> Question {
    let choices = payload.choices.as_ref().map(|choices| match choices {
        PayloadChoices::Authored(list) => list
            .iter()
            .map(|c| Choice {
                id: Some(new_id()),
                text: c.text.clone(),
                is_correct: Some(c.is_correct),
            })
            .collect(),
        PayloadChoices::Flagged(list) => list
            .iter()
            .map(|c| Choice {
                id: Some(new_id()),
                text: c.text.clone(),
                is_correct: Some(c.is_correct),
            })
            .collect(),
    });

    Question {
        id: question_id,
        quiz_id: quiz_id.to_string(),
        question_type: payload.question_type,
        text: payload.text.clone(),
        choices,
        correct_answer: payload.correct_answer.clone(),
        points: payload.points,
    }
}

/// Ids of the choices that count as correct, by flag or by `correctAnswer`
/// key (index or id).
fn correct_choices(question: &Question) -> Vec<&Choice> {
    let keys = question
        .correct_answer
        .as_ref()
        .map(|answer| answer.keys())
        .unwrap_or_default();

    question
        .choice_list()
        .iter()
        .enumerate()
        .filter(|(index, choice)| {
            choice.is_correct == Some(true)
                || keys.contains(&index.to_string().as_str())
                || choice.id.as_deref().is_some_and(|id| keys.contains(&id))
        })
        .map(|(_, choice)| choice)
        .collect()
}

fn score_question(question: &Question, answer: Option<&AttemptAnswer>) -> ScoredAnswer {
    let correct = correct_choices(question);
    let correct_choice_ids: Vec<String> = correct.iter().filter_map(|c| c.id.clone()).collect();
    let correct_choice_texts: Vec<String> = correct.iter().map(|c| c.text.clone()).collect();

    let (is_correct, selected_choice_ids, text_answer) = match answer.map(|a| &a.response) {
        Some(AnswerPayload::Selected(ids)) => {
            let selected: HashSet<&str> = ids.iter().map(String::as_str).collect();
            let expected: HashSet<&str> = correct_choice_ids.iter().map(String::as_str).collect();
            (
                !expected.is_empty() && selected == expected,
                Some(ids.clone()),
                None,
            )
        }
        Some(AnswerPayload::Text(text)) => {
            let matches = question.question_type == QuestionType::Text
                && question.correct_answer.as_ref().is_some_and(|answer| {
                    answer
                        .keys()
                        .iter()
                        .any(|key| key.trim().eq_ignore_ascii_case(text.trim()))
                });
            (matches, None, Some(text.clone()))
        }
        None => (false, None, None),
    };

    ScoredAnswer {
        question_id: question.id.clone(),
        question_type: question.question_type,
        is_correct,
        max_points: question.points,
        points_awarded: if is_correct { question.points } else { 0 },
        correct_choice_ids,
        correct_choice_texts,
        selected_choice_ids,
        text_answer,
    }
}

#[async_trait]
impl QuizStore for MockQuizStore {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_quizzes(&self, scope: Scope) -> Result<Vec<Quiz>, StoreError> {
        self.record_call();
        let quizzes = self.quizzes();
        Ok(quizzes
            .iter()
            .filter(|quiz| visible(quiz, scope))
            .map(|quiz| match scope {
                Scope::Admin => quiz.clone(),
                Scope::Published => Quiz {
                    questions: None,
                    question_count: Some(quiz.question_list().len() as u32),
                    ..quiz.clone()
                },
            })
            .collect())
    }

    async fn get_quiz(&self, scope: Scope, quiz_id: &str) -> Result<Quiz, StoreError> {
        self.record_call();
        if self.fail_quiz_fetch.load(Ordering::Relaxed) {
            return Err(StoreError::NetworkFailure("mock store offline".into()));
        }
        self.quizzes()
            .iter()
            .find(|quiz| quiz.id == quiz_id && visible(quiz, scope))
            .cloned()
            .ok_or_else(|| quiz_not_found(quiz_id))
    }

    async fn create_quiz(&self, quiz: &NewQuiz) -> Result<Quiz, StoreError> {
        self.record_call();
        let now = Utc::now();
        let created = Quiz {
            id: new_id(),
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            slug: quiz.slug.clone(),
            published: quiz.published,
            questions: Some(Vec::new()),
            question_count: None,
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.quizzes().push(created.clone());
        Ok(created)
    }

    async fn update_quiz(&self, quiz_id: &str, patch: &QuizPatch) -> Result<Quiz, StoreError> {
        self.record_call();
        let mut quizzes = self.quizzes();
        let quiz = quizzes
            .iter_mut()
            .find(|quiz| quiz.id == quiz_id)
            .ok_or_else(|| quiz_not_found(quiz_id))?;

        if let Some(title) = &patch.title {
            quiz.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            quiz.description.clone_from(description);
        }
        if let Some(published) = patch.published {
            quiz.published = published;
        }
        quiz.updated_at = Some(Utc::now());
        Ok(quiz.clone())
    }

    async fn delete_quiz(&self, quiz_id: &str) -> Result<(), StoreError> {
        self.record_call();
        let mut quizzes = self.quizzes();
        let before = quizzes.len();
        quizzes.retain(|quiz| quiz.id != quiz_id);
        if quizzes.len() == before {
            return Err(quiz_not_found(quiz_id));
        }
        Ok(())
    }

    async fn create_question(
        &self,
        quiz_id: &str,
        question: &NewQuestion,
    ) -> Result<Question, StoreError> {
        self.record_call();
        let mut quizzes = self.quizzes();
        let quiz = quizzes
            .iter_mut()
            .find(|quiz| quiz.id == quiz_id)
            .ok_or_else(|| quiz_not_found(quiz_id))?;

        let created = materialize(quiz_id, new_id(), question);
        quiz.questions
            .get_or_insert_with(Vec::new)
            .push(created.clone());
        Ok(created)
    }

    async fn update_question(
        &self,
        question_id: &str,
        question: &NewQuestion,
    ) -> Result<Question, StoreError> {
        self.record_call();
        let mut quizzes = self.quizzes();
        let slot = quizzes
            .iter_mut()
            .flat_map(|quiz| quiz.questions.iter_mut().flatten())
            .find(|q| q.id == question_id)
            .ok_or_else(|| question_not_found(question_id))?;

        *slot = materialize(&slot.quiz_id, question_id.to_string(), question);
        Ok(slot.clone())
    }

    async fn delete_question(&self, question_id: &str) -> Result<(), StoreError> {
        self.record_call();
        let mut quizzes = self.quizzes();
        for quiz in quizzes.iter_mut() {
            if let Some(questions) = quiz.questions.as_mut() {
                if let Some(pos) = questions.iter().position(|q| q.id == question_id) {
                    questions.remove(pos);
                    return Ok(());
                }
            }
        }
        Err(question_not_found(question_id))
    }

    async fn submit_attempt(
        &self,
        quiz_id: &str,
        answers: &[AttemptAnswer],
    ) -> Result<ScoringResponse, StoreError> {
        self.record_call();
        let quizzes = self.quizzes();
        let quiz = quizzes
            .iter()
            .find(|quiz| quiz.id == quiz_id && quiz.published)
            .ok_or_else(|| quiz_not_found(quiz_id))?;

        *lock(&self.last_submission) = Some(answers.to_vec());

        let scored: Vec<ScoredAnswer> = quiz
            .question_list()
            .iter()
            .map(|question| {
                let answer = answers.iter().find(|a| a.question_id == question.id);
                score_question(question, answer)
            })
            .collect();

        Ok(ScoringResponse {
            attempt_id: new_id(),
            quiz_id: quiz.id.clone(),
            score: scored.iter().map(|s| s.points_awarded).sum(),
            max_score: quiz.total_points(),
            answers: scored,
        })
    }
}
