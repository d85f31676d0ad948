//! Mock Provider
//!
//! A scripted provider for driving flows without network access. Responses
//! are queued up front; each call pops the next one and records the request
//! so tests can assert on prompts, ordering, and call counts.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::provider::LlmProvider;
use super::types::{
    FinishReason, LlmError, LlmResult, ProviderConfig, ProviderType, StructuredRequest,
    StructuredResponse, UsageStats,
};

/// Scripted mock provider
pub struct MockProvider {
    config: ProviderConfig,
    responses: Mutex<VecDeque<LlmResult<serde_json::Value>>>,
    requests: Mutex<Vec<StructuredRequest>>,
    calls: AtomicUsize,
}

impl MockProvider {
    /// Create a mock with an empty response queue
    pub fn new() -> Self {
        Self {
            config: ProviderConfig {
                provider: ProviderType::Mock,
                model: "mock-model".to_string(),
                ..ProviderConfig::default()
            },
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock that will return the given JSON document once
    pub fn with_response(json: serde_json::Value) -> Self {
        let mock = Self::new();
        mock.push_response(json);
        mock
    }

    /// Queue a JSON document to return
    pub fn push_response(&self, json: serde_json::Value) {
        self.responses.lock().unwrap().push_back(Ok(json));
    }

    /// Queue an error to return
    pub fn push_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Number of generate calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests seen so far, in call order
    pub fn requests(&self) -> Vec<StructuredRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate_structured(
        &self,
        request: StructuredRequest,
    ) -> LlmResult<StructuredResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let model = request.model(&self.config.model).to_string();
        self.requests.lock().unwrap().push(request);

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(json)) => Ok(StructuredResponse {
                json,
                finish_reason: FinishReason::Stop,
                usage: UsageStats::default(),
                model,
            }),
            Some(Err(e)) => Err(e),
            None => Err(LlmError::Other {
                message: "mock response queue is empty".to_string(),
            }),
        }
    }

    async fn health_check(&self) -> LlmResult<()> {
        Ok(())
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}
