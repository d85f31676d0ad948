//! Storage Layer
//!
//! Configuration persistence. Session records live in an external store; see
//! `services::sessions`.

pub mod config;

pub use config::{AssistantConfig, ConfigService};
