//! The `quizkit take` command.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use quizkit_core::attempt::DraftAnswers;
use quizkit_core::model::{AttemptResult, DraftAnswer, Quiz};
use quizkit_core::session::TakingSession;

pub async fn execute(
    quiz_id: String,
    answers_path: PathBuf,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let raw = read_answers(&answers_path)?;
    let session = TakingSession::new(super::connect(config_path)?);

    let (quiz, mut drafts) = session.start(&quiz_id).await?;
    apply_answers(&quiz, &mut drafts, raw)?;

    session.submit(&quiz, &drafts).await?;
    let result = session.result(&quiz.id).await?;

    print_result(&quiz, &result);
    Ok(())
}

/// Read a TOML table mapping question id to a value or list of values.
///
/// Integers are accepted as choice indices.
fn read_answers(path: &Path) -> Result<HashMap<String, DraftAnswer>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    let table: toml::Table = toml::from_str(&content)
        .with_context(|| format!("failed to parse answers file: {}", path.display()))?;

    table
        .into_iter()
        .map(|(question_id, value)| {
            let draft = to_draft(&value).with_context(|| {
                format!("unsupported answer for question {question_id}: {value}")
            })?;
            Ok((question_id, draft))
        })
        .collect()
}

fn to_draft(value: &toml::Value) -> Option<DraftAnswer> {
    match value {
        toml::Value::Array(items) => items
            .iter()
            .map(scalar)
            .collect::<Option<Vec<_>>>()
            .map(DraftAnswer::MultiChoice),
        other => scalar(other).map(DraftAnswer::Choice),
    }
}

fn scalar(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Overlay file answers onto the session's drafts, shaped for each question.
fn apply_answers(
    quiz: &Quiz,
    drafts: &mut DraftAnswers,
    mut raw: HashMap<String, DraftAnswer>,
) -> Result<()> {
    for question in quiz.question_list() {
        if let Some(answer) = raw.remove(&question.id) {
            drafts.insert(question.id.clone(), answer.for_type(question.question_type));
        }
    }

    if let Some(unknown) = raw.keys().next() {
        anyhow::bail!("answers file names unknown question {unknown}");
    }
    Ok(())
}

fn print_result(quiz: &Quiz, result: &AttemptResult) {
    println!("{}", quiz.title);
    println!(
        "Score: {}/{} ({}%), {} of {} correct\n",
        result.score,
        result.total_points,
        result.percentage(),
        result.correct_count(),
        result.answers.len()
    );

    for (number, outcome) in result.answers.iter().enumerate() {
        println!(
            "{}. {} [{}] {}/{} pt",
            number + 1,
            outcome.question_label(),
            if outcome.is_correct { "correct" } else { "incorrect" },
            outcome.points_earned,
            outcome.question.points
        );
        println!("   Your answer: {}", outcome.user_answer_display());
        if !outcome.is_correct && !outcome.correct_answer.is_empty() {
            println!("   Correct answer: {}", outcome.correct_answer);
        }
    }
}
