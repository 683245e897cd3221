//! Result reconciliation.
//!
//! A scoring response only carries question identifiers. Reconciling merges
//! each outcome with the matching question of the quiz so the result can show
//! question text and declared points.

use std::collections::HashMap;

use crate::model::{AttemptResult, Question, Quiz};
use crate::wire::ScoringResponse;

/// Merge a result with the quiz it was scored against.
///
/// Outcomes keep the order the store returned them in, along with their
/// correctness flags and awarded points. An outcome whose question is not in
/// the quiz keeps its placeholder question. With no quiz at all the result
/// is returned unchanged.
pub fn reconcile(mut result: AttemptResult, quiz: Option<&Quiz>) -> AttemptResult {
    let Some(quiz) = quiz else {
        return result;
    };

    let by_id: HashMap<&str, &Question> = quiz
        .question_list()
        .iter()
        .map(|q| (q.id.as_str(), q))
        .collect();

    for outcome in &mut result.answers {
        match by_id.get(outcome.question_id.as_str()) {
            Some(question) => outcome.question = (*question).clone(),
            None => {
                tracing::debug!(
                    question_id = %outcome.question_id,
                    quiz_id = %quiz.id,
                    "scored question missing from quiz, keeping placeholder"
                );
            }
        }
    }

    result
}

/// Translate and reconcile a raw scoring response in one step.
pub fn reconcile_response(response: ScoringResponse, quiz: Option<&Quiz>) -> AttemptResult {
    reconcile(AttemptResult::from_wire(response), quiz)
}

/// Whole-number percentage of `score` over `total_points`.
///
/// A quiz worth zero points scores 0%.
pub fn percentage(score: u32, total_points: u32) -> u32 {
    if total_points == 0 {
        return 0;
    }
    (f64::from(score) / f64::from(total_points) * 100.0).round() as u32
}

impl AttemptResult {
    pub fn percentage(&self) -> u32 {
        percentage(self.score, self.total_points)
    }

    /// Number of outcomes marked correct.
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }
}
