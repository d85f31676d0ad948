//! Response Types
//!
//! The uniform result envelope returned by every action. Errors never escape
//! an action; failures resolve to `data: None` plus a message.

use serde::{Deserialize, Serialize};

/// Generic action result envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ActionResult<T> {
    /// Create a successful result with data
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// Create a failed result with a message
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }

    /// Whether this result carries data
    pub fn is_ok(&self) -> bool {
        self.data.is_some()
    }
}
