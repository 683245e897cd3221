//! The `quizkit create-quiz`, `edit-quiz`, `publish` and `delete-quiz` commands.

use std::path::PathBuf;

use anyhow::Result;

use quizkit_core::form::QuizForm;
use quizkit_core::session::AuthoringSession;

pub async fn create(
    title: String,
    description: String,
    published: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let session = AuthoringSession::new(super::connect(config_path)?);
    let form = QuizForm {
        title,
        description,
        published,
    };

    let quiz = session.create_quiz(&form).await?;
    println!("Created quiz {} ({})", quiz.id, quiz.slug);
    Ok(())
}

/// Change a quiz's title or description, keeping whatever is not given.
pub async fn edit(
    quiz_id: String,
    title: Option<String>,
    description: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        title.is_some() || description.is_some(),
        "nothing to change: pass --title or --description"
    );

    let session = AuthoringSession::new(super::connect(config_path)?);
    let mut form = session.edit_quiz(&quiz_id).await?;
    if let Some(title) = title {
        form.title = title;
    }
    if let Some(description) = description {
        form.description = description;
    }

    let quiz = session.update_quiz(&quiz_id, &form).await?;
    println!("Updated quiz {} ({})", quiz.id, quiz.title);
    Ok(())
}

pub async fn publish(quiz_id: String, published: bool, config_path: Option<PathBuf>) -> Result<()> {
    let session = AuthoringSession::new(super::connect(config_path)?);
    let quiz = session.set_published(&quiz_id, published).await?;

    if quiz.published {
        println!("Published {}", quiz.title);
    } else {
        println!("Unpublished {}", quiz.title);
    }
    Ok(())
}

pub async fn delete(quiz_id: String, config_path: Option<PathBuf>) -> Result<()> {
    let session = AuthoringSession::new(super::connect(config_path)?);
    session.delete_quiz(&quiz_id).await?;
    println!("Deleted quiz {quiz_id}");
    Ok(())
}
