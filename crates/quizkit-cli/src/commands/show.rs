//! The `quizkit show` command.

use std::path::PathBuf;

use anyhow::Result;

use quizkit_core::model::{Question, Quiz};
use quizkit_core::traits::Scope;

pub async fn execute(quiz_id: String, admin: bool, config_path: Option<PathBuf>) -> Result<()> {
    let store = super::connect(config_path)?;
    let scope = if admin { Scope::Admin } else { Scope::Published };
    let quiz = store.get_quiz(scope, &quiz_id).await?;

    print_quiz(&quiz, admin);
    Ok(())
}

fn print_quiz(quiz: &Quiz, admin: bool) {
    println!("{} ({})", quiz.title, quiz.slug);
    if !quiz.description.is_empty() {
        println!("{}", quiz.description);
    }
    if admin {
        println!(
            "Status: {}",
            if quiz.published { "published" } else { "draft" }
        );
    }
    println!(
        "{} question(s), {} point(s)\n",
        quiz.question_total(),
        quiz.total_points()
    );

    for (number, question) in quiz.question_list().iter().enumerate() {
        print_question(number + 1, question, admin);
    }
}

fn print_question(number: usize, question: &Question, admin: bool) {
    println!(
        "{number}. {} [{}, {} pt]",
        question.text, question.question_type, question.points
    );
    if admin {
        println!("   id: {}", question.id);
    }

    let correct_keys = question
        .correct_answer
        .as_ref()
        .map(|answer| answer.keys())
        .unwrap_or_default();

    for (index, choice) in question.choice_list().iter().enumerate() {
        let marked = admin
            && (choice.is_correct == Some(true)
                || correct_keys.contains(&index.to_string().as_str())
                || choice
                    .id
                    .as_deref()
                    .is_some_and(|id| correct_keys.contains(&id)));
        let id = choice.id.as_deref().unwrap_or("-");
        println!(
            "   {}{index}) {} ({id})",
            if marked { "*" } else { " " },
            choice.text
        );
    }
}
