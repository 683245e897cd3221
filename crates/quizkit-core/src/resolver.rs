//! Choice index resolution.
//!
//! The taking UI captures selections by position because choices may not
//! have stable identifiers yet. At submission time each position is turned
//! into the choice's identifier when one exists.
//!
//! A value that parses as an in-range index is always treated as an index.
//! Stores that use small numeric strings as choice identifiers are therefore
//! ambiguous; such identifiers resolve to whichever choice sits at that
//! position.

use crate::model::Choice;

/// Resolve one selected value against a question's choices.
///
/// Returns the identifier of the choice at that index when `value` is an
/// in-range index and the choice has an identifier. Every other value is
/// returned verbatim so the store can reject it explicitly.
pub fn resolve_choice(value: &str, choices: &[Choice]) -> String {
    let Ok(index) = value.parse::<usize>() else {
        return value.to_string();
    };

    match choices.get(index).and_then(|choice| choice.id.as_deref()) {
        Some(id) => id.to_string(),
        None => value.to_string(),
    }
}

/// Resolve every value in order. Duplicates are kept.
pub fn resolve_all(values: &[String], choices: &[Choice]) -> Vec<String> {
    values
        .iter()
        .map(|value| resolve_choice(value, choices))
        .collect()
}
