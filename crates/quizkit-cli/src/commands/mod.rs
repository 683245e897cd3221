pub mod init;
pub mod list;
pub mod question;
pub mod quiz;
pub mod show;
pub mod slug;
pub mod take;
pub mod validate_question;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use quizkit_core::form::QuestionForm;
use quizkit_core::traits::QuizStore;
use quizkit_store::config::{create_store, load_config_from};

/// Load the config and build the store it points at.
pub(crate) fn connect(config_path: Option<PathBuf>) -> Result<Arc<dyn QuizStore>> {
    let config = load_config_from(config_path.as_deref())?;
    let store = create_store(&config)?;
    tracing::debug!(store = store.name(), base_url = %config.base_url, "quiz store ready");
    Ok(store)
}

/// Read a question form from a TOML file.
pub(crate) fn read_question_form(path: &Path) -> Result<QuestionForm> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse question file: {}", path.display()))
}
