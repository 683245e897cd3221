//! quizkit-core: answer normalization and scoring reconciliation.
//!
//! This crate maps loosely-typed draft answers to the store's canonical
//! submission shape, and merges the store's compact scoring back with the
//! quiz definition for display. Everything here is synchronous except the
//! session flows, which talk to a [`traits::QuizStore`].

pub mod attempt;
pub mod encoder;
pub mod error;
pub mod form;
pub mod handoff;
pub mod model;
pub mod reconcile;
pub mod resolver;
pub mod session;
pub mod traits;
pub mod wire;

pub use error::{StoreError, ValidationError};
