//! Store configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizkit_core::traits::QuizStore;

use crate::http::HttpQuizStore;

/// Where the quiz store lives and how to talk to it.
///
/// Note: Custom Debug impl masks the admin token to keep it out of logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the store API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Bearer token sent on admin requests, if the deployment needs one.
    #[serde(default)]
    pub admin_token: Option<String>,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("admin_token", &self.admin_token.as_ref().map(|_| "***"))
            .finish()
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            admin_token: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizkit.toml` in the current directory
/// 2. `~/.config/quizkit/config.toml`
///
/// Environment variable override: `QUIZKIT_API_URL`.
pub fn load_config() -> Result<StoreConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<StoreConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizkit.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<StoreConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => StoreConfig::default(),
    };

    if let Ok(url) = std::env::var("QUIZKIT_API_URL") {
        config.base_url = url;
    }

    config.base_url = resolve_env_vars(&config.base_url);
    config.admin_token = config
        .admin_token
        .as_deref()
        .map(resolve_env_vars)
        .filter(|t| !t.is_empty());

    anyhow::ensure!(config.timeout_secs >= 1, "timeout_secs must be at least 1");
    tracing::debug!(?config, "store config loaded");

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizkit"))
}

/// Create the HTTP store described by a configuration.
pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn QuizStore>> {
    let store = HttpQuizStore::new(config).context("failed to build HTTP client")?;
    Ok(Arc::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZKIT_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZKIT_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZKIT_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no ${closing"), "no ${closing");
        std::env::remove_var("_QUIZKIT_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.admin_token.is_none());
    }

    #[test]
    fn debug_masks_token() {
        let config = StoreConfig {
            admin_token: Some("secret-token".into()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizkit.toml");
        std::fs::write(
            &path,
            r#"
base_url = "https://quiz.example.com"
timeout_secs = 5
admin_token = "${_QUIZKIT_TEST_TOKEN}"
"#,
        )
        .unwrap();

        std::env::set_var("_QUIZKIT_TEST_TOKEN", "abc");
        let config = load_config_from(Some(&path)).unwrap();
        std::env::remove_var("_QUIZKIT_TEST_TOKEN");

        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.admin_token.as_deref(), Some("abc"));
        // QUIZKIT_API_URL may be set in the environment running the tests.
        if std::env::var("QUIZKIT_API_URL").is_err() {
            assert_eq!(config.base_url, "https://quiz.example.com");
        }
    }

    #[test]
    fn missing_explicit_file_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/quizkit.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
