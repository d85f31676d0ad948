//! VPN Commander LLM
//!
//! Provides a unified interface for schema-constrained structured generation.
//! The assistant flows send a fixed system prompt, a rendered user prompt, and
//! a JSON schema; the provider returns a JSON value expected to conform to
//! that schema. Callers, not providers, perform the final typed validation.
//!
//! Implementations:
//! - Google Gemini (the model family the product targets)
//! - a scripted mock provider used by the workspace tests

pub mod gemini;
pub mod http_client;
pub mod mock;
pub mod provider;
pub mod types;

// Re-export main types
pub use gemini::GeminiProvider;
pub use http_client::build_http_client;
pub use mock::MockProvider;
pub use provider::LlmProvider;
pub use types::*;
