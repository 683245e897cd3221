//! The `quizkit validate-question` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub fn execute(path: PathBuf) -> Result<()> {
    let form = super::read_question_form(&path)?;
    let payload = form
        .encode()
        .with_context(|| format!("invalid question in {}", path.display()))?;

    println!("{}", serde_json::to_string_pretty(&payload)?);
    eprintln!("Question valid.");
    Ok(())
}
