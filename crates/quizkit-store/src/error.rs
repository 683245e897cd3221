//! Store error classification.
//!
//! `StoreError` itself lives in `quizkit-core` so the session layer can match
//! on it; this module maps HTTP-level failures onto it.

pub use quizkit_core::error::StoreError;

use serde::Deserialize;

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Map a transport error from reqwest.
pub(crate) fn from_transport(e: reqwest::Error, base_url: &str, timeout_secs: u64) -> StoreError {
    if e.is_timeout() {
        StoreError::Timeout(timeout_secs)
    } else if e.is_connect() {
        StoreError::NetworkFailure(format!("quiz store not reachable at {base_url}"))
    } else {
        StoreError::NetworkFailure(e.to_string())
    }
}

/// Map an error status. `what` names the resource for 404s.
///
/// The store reports failures as `{"message": "..."}`; that message is
/// preferred over the raw body.
pub(crate) fn from_status(status: u16, body: &str, what: &str) -> StoreError {
    if status == 404 {
        return StoreError::NotFound(what.to_string());
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.trim().to_string());

    StoreError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_resource() {
        let err = from_status(404, "", "quiz z1");
        assert!(matches!(err, StoreError::NotFound(ref w) if w == "quiz z1"));
        assert!(err.is_terminal());
    }

    #[test]
    fn json_message_is_extracted() {
        let err = from_status(422, r#"{"message": "answers incomplete"}"#, "attempt");
        assert_eq!(err.to_string(), "store error (HTTP 422): answers incomplete");
    }

    #[test]
    fn plain_body_is_kept() {
        let err = from_status(500, "internal error\n", "attempt");
        assert!(matches!(
            err,
            StoreError::Api { status: 500, ref message } if message == "internal error"
        ));
    }
}
