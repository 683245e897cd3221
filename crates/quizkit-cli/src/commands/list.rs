//! The `quizkit list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizkit_core::traits::Scope;

pub async fn execute(all: bool, config_path: Option<PathBuf>) -> Result<()> {
    let store = super::connect(config_path)?;
    let scope = if all { Scope::Admin } else { Scope::Published };
    let quizzes = store.list_quizzes(scope).await?;

    if quizzes.is_empty() {
        println!("No quizzes found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Title", "Slug", "Published", "Questions", "Updated"]);

    for quiz in &quizzes {
        let updated = quiz
            .updated_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(&quiz.id),
            Cell::new(&quiz.title),
            Cell::new(&quiz.slug),
            Cell::new(if quiz.published { "yes" } else { "no" }),
            Cell::new(quiz.question_total()),
            Cell::new(updated),
        ]);
    }

    println!("{table}");
    Ok(())
}
