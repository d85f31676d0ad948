//! Error Handling
//!
//! Unified error types for the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;
use vpn_commander_llm::LlmError;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors (caller input does not conform to a flow schema)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Model errors (provider failures and non-conformant model output)
    #[error("Model error: {0}")]
    Model(#[from] LlmError),

    /// Session store errors
    #[error("Session error: {0}")]
    Session(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a model error for output that fails the flow's schema
    pub fn model_output(msg: impl Into<String>) -> Self {
        Self::Model(LlmError::ParseError {
            message: msg.into(),
        })
    }

    /// Create a session error
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Convert AppError to a string suitable for action-layer envelopes
impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}
