//! Take a quiz end to end against the in-memory store.
//!
//! Run with: cargo run -p quizkit-store --example take_quiz

use std::sync::Arc;

use quizkit_core::model::{Choice, CorrectAnswer, DraftAnswer, Question, QuestionType, Quiz};
use quizkit_core::session::TakingSession;
use quizkit_store::MockQuizStore;

fn flagged(id: &str, text: &str, correct: bool) -> Choice {
    Choice {
        id: Some(id.into()),
        text: text.into(),
        is_correct: Some(correct),
    }
}

fn sample_quiz() -> Quiz {
    Quiz {
        id: "geo".into(),
        title: "Geography".into(),
        description: "A short warm-up".into(),
        slug: "geography".into(),
        published: true,
        questions: Some(vec![
            Question {
                id: "q1".into(),
                quiz_id: "geo".into(),
                question_type: QuestionType::McqMulti,
                text: "Which are in Europe?".into(),
                choices: Some(vec![
                    flagged("c1", "France", true),
                    flagged("c2", "Peru", false),
                    flagged("c3", "Norway", true),
                ]),
                correct_answer: None,
                points: 2,
            },
            Question {
                id: "q2".into(),
                quiz_id: "geo".into(),
                question_type: QuestionType::Text,
                text: "Capital of Italy?".into(),
                choices: None,
                correct_answer: Some(CorrectAnswer::Single("Rome".into())),
                points: 1,
            },
        ]),
        question_count: None,
        created_at: None,
        updated_at: None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let store = Arc::new(MockQuizStore::new().with_quiz(sample_quiz()));
    let session = TakingSession::new(store);

    let (quiz, mut drafts) = session.start("geo").await?;

    // Indices and choice ids are both accepted.
    drafts.insert(
        "q1".into(),
        DraftAnswer::MultiChoice(vec!["0".into(), "c2".into()]),
    );
    drafts.insert("q2".into(), DraftAnswer::Text("rome".into()));

    session.submit(&quiz, &drafts).await?;
    let result = session.result(&quiz.id).await?;

    println!(
        "{}: {}/{} ({}%)",
        quiz.title,
        result.score,
        result.total_points,
        result.percentage()
    );
    for outcome in &result.answers {
        println!(
            "  {} -> {} (correct: {})",
            outcome.question_label(),
            outcome.user_answer_display(),
            outcome.correct_answer
        );
    }

    Ok(())
}
