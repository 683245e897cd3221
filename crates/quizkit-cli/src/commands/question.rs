//! The `quizkit add-question`, `edit-question` and `delete-question` commands.

use std::path::PathBuf;

use anyhow::Result;

use quizkit_core::session::AuthoringSession;

pub async fn add(quiz_id: String, path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let form = super::read_question_form(&path)?;
    let session = AuthoringSession::new(super::connect(config_path)?);

    let question = session.add_question(&quiz_id, &form).await?;
    println!("Added question {} to quiz {quiz_id}", question.id);
    Ok(())
}

/// With a file, replace the question. Without one, print the stored
/// question as a form that can be edited and passed back with `--file`.
pub async fn edit(
    question_id: String,
    path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let session = AuthoringSession::new(super::connect(config_path)?);

    let Some(path) = path else {
        let (quiz_id, form) = session.edit_question(&question_id).await?;
        println!("# question {question_id} in quiz {quiz_id}");
        print!("{}", toml::to_string_pretty(&form)?);
        return Ok(());
    };

    let form = super::read_question_form(&path)?;
    // Resolve the owner first so an unknown id fails before anything is sent.
    let (quiz_id, _) = session.edit_question(&question_id).await?;
    let question = session.save_question(&question_id, &form).await?;
    println!("Updated question {} in quiz {quiz_id}", question.id);
    Ok(())
}

pub async fn delete(question_id: String, config_path: Option<PathBuf>) -> Result<()> {
    let session = AuthoringSession::new(super::connect(config_path)?);
    session.delete_question(&question_id).await?;
    println!("Deleted question {question_id}");
    Ok(())
}
