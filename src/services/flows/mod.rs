//! Assistant Flows
//!
//! The schema-constrained AI flows behind the dashboard: analyze, explain,
//! and plan. Each flow validates its typed input, opens a best-effort audit
//! session, renders a fixed prompt template, invokes the provider constrained
//! by the output type's JSON schema, validates the result, and records it
//! with measured latency.
//!
//! Ordering is fixed: session creation and input logging happen strictly
//! before the model call; result logging strictly after it succeeds. Each
//! call is a single round trip with no retries, timeouts, or shared state.

use std::sync::Arc;
use std::time::Instant;

use schemars::generate::SchemaSettings;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use vpn_commander_llm::{GeminiProvider, LlmProvider, StructuredRequest};

use crate::services::sessions::{CallerIdentity, NullSessionStore, SessionStore};
use crate::storage::config::AssistantConfig;
use crate::utils::error::{AppError, AppResult};

pub mod analyze;
pub mod explain;
pub mod plan;

/// Fixed system prompt establishing the behavioral contract for every flow.
pub const SYSTEM_PROMPT: &str = "You are the Server Provision Assistant for a VPN platform.
Return concise, actionable steps. Prefer minimal, safe changes.
Never output secrets or destructive commands.
When uncertain, set \"requires_check\": true.
Output must be valid JSON for the given schema.
Provide both bash and PowerShell when commands are requested.";

/// The assistant service owning the provider, session store, and config.
pub struct Assistant {
    provider: Arc<dyn LlmProvider>,
    store: Arc<dyn SessionStore>,
    config: AssistantConfig,
}

impl Assistant {
    /// Create an assistant over explicit provider and store instances
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        store: Arc<dyn SessionStore>,
        config: AssistantConfig,
    ) -> Self {
        Self {
            provider,
            store,
            config,
        }
    }

    /// Create a production assistant: Gemini provider, stub session store
    pub fn from_config(config: AssistantConfig) -> Self {
        let provider = Arc::new(GeminiProvider::new(config.provider_config()));
        Self::new(provider, Arc::new(NullSessionStore::new()), config)
    }

    /// Current assistant configuration
    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Open an audit session. Store failures downgrade the rest of this
    /// call's persistence to no-ops instead of aborting the flow.
    pub(crate) async fn open_session(
        &self,
        caller: &CallerIdentity,
        goal: &str,
        context: serde_json::Value,
        model: &str,
    ) -> Option<String> {
        match self
            .store
            .create_session(&caller.user_id, goal, context, model)
            .await
        {
            Ok(session_id) => Some(session_id),
            Err(e) => {
                warn!(error = %e, "failed to create AI session; continuing without audit record");
                None
            }
        }
    }

    /// Best-effort: store the caller's raw input against the session.
    pub(crate) async fn record_input<T: Serialize>(&self, session_id: Option<&str>, input: &T) {
        let Some(session_id) = session_id else {
            return;
        };
        let value = match serde_json::to_value(input) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, session_id, "failed to serialize input for audit");
                return;
            }
        };
        if let Err(e) = self.store.save_user_input(session_id, value).await {
            warn!(error = %e, session_id, "failed to store user input");
        }
    }

    /// Best-effort: store the validated result and measured latency.
    pub(crate) async fn record_result<T: Serialize>(
        &self,
        session_id: Option<&str>,
        result: &T,
        latency_ms: u64,
    ) {
        let Some(session_id) = session_id else {
            return;
        };
        let value = match serde_json::to_value(result) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, session_id, "failed to serialize result for audit");
                return;
            }
        };
        if let Err(e) = self.store.save_result(session_id, value, latency_ms).await {
            warn!(error = %e, session_id, "failed to store result");
        }
    }

    /// Invoke the provider constrained by `T`'s JSON schema, measure wall
    /// clock latency around the call, and deserialize the response document.
    ///
    /// A document that does not deserialize into `T` is a model error, never
    /// a partially-typed value.
    pub(crate) async fn generate<T>(&self, model: &str, prompt: String) -> AppResult<(T, u64)>
    where
        T: DeserializeOwned + JsonSchema,
    {
        let request = StructuredRequest {
            system: SYSTEM_PROMPT.to_string(),
            prompt,
            response_schema: output_schema::<T>()?,
            model_override: Some(model.to_string()),
        };

        let started = Instant::now();
        let response = self.provider.generate_structured(request).await?;
        let latency_ms = started.elapsed().as_millis() as u64;

        let output: T = serde_json::from_value(response.json).map_err(|e| {
            AppError::model_output(format!("response does not conform to the output schema: {}", e))
        })?;

        Ok((output, latency_ms))
    }
}

/// Re-map an output `validate()` failure to a model error: a response that
/// deserialized but fails the contract is the model's fault, not the caller's.
pub(crate) fn require_conformant(result: AppResult<()>) -> AppResult<()> {
    match result {
        Ok(()) => Ok(()),
        Err(AppError::Validation(msg)) => Err(AppError::model_output(msg)),
        Err(e) => Err(e),
    }
}

/// Inline JSON schema for a flow output type.
fn output_schema<T: JsonSchema>() -> AppResult<serde_json::Value> {
    let mut settings = SchemaSettings::draft07();
    settings.inline_subschemas = true;
    let schema = settings.into_generator().into_root_schema_for::<T>();
    serde_json::to_value(schema).map_err(AppError::from)
}
