//! Read-once handoff between attempt submission and result display.

use std::sync::Mutex;

/// A single-value slot that is written once and consumed at most once.
///
/// `take` reads and clears in one step, so a second read (a reload of the
/// result page) sees nothing rather than a stale result.
#[derive(Debug, Default)]
pub struct ResultSlot<T> {
    value: Mutex<Option<T>>,
}

impl<T> ResultSlot<T> {
    pub fn new() -> Self {
        Self {
            value: Mutex::new(None),
        }
    }

    /// Store a value, replacing anything not yet consumed.
    pub fn put(&self, value: T) {
        let mut slot = self.value.lock().unwrap_or_else(|e| e.into_inner());
        if slot.replace(value).is_some() {
            tracing::debug!("replaced an unconsumed result");
        }
    }

    /// Take the value out, leaving the slot empty.
    pub fn take(&self) -> Option<T> {
        self.value.lock().unwrap_or_else(|e| e.into_inner()).take()
    }

    pub fn is_empty(&self) -> bool {
        self.value
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_none()
    }
}
