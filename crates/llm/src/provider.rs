//! LLM Provider Trait
//!
//! Defines the common interface for structured-generation providers.

use async_trait::async_trait;

use super::types::{LlmError, LlmResult, ProviderConfig, StructuredRequest, StructuredResponse};

/// Trait that all structured-generation providers must implement.
///
/// A provider is responsible for a single best-effort round trip: no retries,
/// no timeout enforcement. It returns the model's JSON document; typed
/// validation against the flow's output contract happens in the caller.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the default model, used when a request carries no override.
    fn model(&self) -> &str;

    /// Generate a JSON document constrained by the request's response schema.
    ///
    /// A successful HTTP round trip that yields no parseable JSON payload is
    /// an error (`EmptyResponse` or `ParseError`), never a silent default.
    async fn generate_structured(
        &self,
        request: StructuredRequest,
    ) -> LlmResult<StructuredResponse>;

    /// Check if the provider is configured and reachable.
    async fn health_check(&self) -> LlmResult<()>;

    /// Get the configuration for this provider.
    fn config(&self) -> &ProviderConfig;
}

/// Helper function to create an error for missing API key
pub fn missing_api_key_error(provider: &str) -> LlmError {
    LlmError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Helper function to parse HTTP error status codes
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    match status {
        401 => LlmError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => LlmError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        404 => LlmError::ModelNotFound {
            model: body.to_string(),
        },
        429 => LlmError::RateLimited {
            message: body.to_string(),
            retry_after: None,
        },
        400 => LlmError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}
