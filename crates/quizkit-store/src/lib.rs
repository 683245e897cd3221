//! quizkit-store: quiz store integrations.
//!
//! Implements the `QuizStore` trait over the store's REST API, plus an
//! in-memory store for tests and the configuration that points at a
//! deployment.

pub mod config;
pub mod error;
pub mod http;
pub mod mock;

pub use config::{create_store, load_config, load_config_from, StoreConfig};
pub use error::StoreError;
pub use http::HttpQuizStore;
pub use mock::MockQuizStore;
