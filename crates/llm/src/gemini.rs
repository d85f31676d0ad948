//! Google Gemini Provider
//!
//! Implementation of the LlmProvider trait for the Gemini API's JSON mode.
//! Requests pin `responseMimeType` to `application/json` and carry the
//! flow's output schema as `responseSchema`, so the model is constrained to
//! emit a schema-shaped document.

use async_trait::async_trait;
use serde::Deserialize;

use super::http_client::build_http_client;
use super::provider::{missing_api_key_error, parse_http_error, LlmProvider};
use super::types::{
    FinishReason, LlmError, LlmResult, ProviderConfig, StructuredRequest, StructuredResponse,
    UsageStats,
};

/// Default Gemini API endpoint
const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini provider
pub struct GeminiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = build_http_client();
        Self { config, client }
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(GEMINI_API_URL)
    }

    /// Endpoint for a generateContent call against `model`
    fn generate_url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url(), model)
    }

    /// Build the request body for the API
    fn build_request_body(&self, request: &StructuredRequest) -> serde_json::Value {
        let mut schema = request.response_schema.clone();
        sanitize_schema(&mut schema);

        serde_json::json!({
            "systemInstruction": {
                "parts": [{ "text": request.system }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }]
            }],
            "generationConfig": {
                "temperature": self.config.temperature,
                "maxOutputTokens": self.config.max_output_tokens,
                "responseMimeType": "application/json",
                "responseSchema": schema,
            }
        })
    }

    /// Parse a generateContent response into a StructuredResponse
    fn parse_response(
        &self,
        model: &str,
        response: GeminiResponse,
    ) -> LlmResult<StructuredResponse> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::EmptyResponse {
                message: "response contained no candidates".to_string(),
            })?;

        let finish_reason = candidate
            .finish_reason
            .as_deref()
            .map(FinishReason::from)
            .unwrap_or(FinishReason::Stop);

        let text: String = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::EmptyResponse {
                message: format!("candidate carried no text (finish reason {:?})", finish_reason),
            });
        }

        let json: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| LlmError::ParseError {
                message: format!("candidate text is not valid JSON: {}", e),
            })?;

        let usage = response
            .usage_metadata
            .map(|u| UsageStats {
                prompt_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            })
            .unwrap_or_default();

        Ok(StructuredResponse {
            json,
            finish_reason,
            usage,
            model: response.model_version.unwrap_or_else(|| model.to_string()),
        })
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate_structured(
        &self,
        request: StructuredRequest,
    ) -> LlmResult<StructuredResponse> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("gemini"))?;

        let model = request.model(&self.config.model).to_string();
        let body = self.build_request_body(&request);

        tracing::debug!(model = %model, "sending structured generation request");

        let response = self
            .client
            .post(self.generate_url(&model))
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| LlmError::NetworkError {
            message: e.to_string(),
        })?;

        if status != 200 {
            return Err(parse_http_error(status, &body_text, "gemini"));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        self.parse_response(&model, gemini_response)
    }

    async fn health_check(&self) -> LlmResult<()> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("gemini"))?;

        let response = self
            .client
            .get(format!("{}/v1beta/models", self.base_url()))
            .header("x-goog-api-key", api_key)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body_text = response.text().await.unwrap_or_default();
            return Err(parse_http_error(status, &body_text, "gemini"));
        }

        Ok(())
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

/// Rewrite a JSON schema in place into the OpenAPI subset Gemini accepts.
///
/// - drops draft-07 metadata keys (`$schema`, `title`)
/// - folds `"type": ["X", "null"]` unions into `"type": "X"` + `"nullable": true`
///
/// Recursion only follows schema-bearing keys; the `properties` map holds
/// field names (a field may itself be called "title") and its keys must
/// never be touched.
fn sanitize_schema(schema: &mut serde_json::Value) {
    let serde_json::Value::Object(map) = schema else {
        return;
    };

    map.remove("$schema");
    map.remove("title");

    if let Some(serde_json::Value::Array(types)) = map.get("type") {
        let non_null: Vec<String> = types
            .iter()
            .filter_map(|t| t.as_str())
            .filter(|t| *t != "null")
            .map(|t| t.to_string())
            .collect();
        let nullable = types.iter().any(|t| t.as_str() == Some("null"));
        if let [single] = non_null.as_slice() {
            map.insert("type".to_string(), serde_json::Value::String(single.clone()));
            if nullable {
                map.insert("nullable".to_string(), serde_json::Value::Bool(true));
            }
        }
    }

    for (key, value) in map.iter_mut() {
        match key.as_str() {
            "properties" => {
                if let serde_json::Value::Object(props) = value {
                    for prop_schema in props.values_mut() {
                        sanitize_schema(prop_schema);
                    }
                }
            }
            "items" | "additionalProperties" => match value {
                serde_json::Value::Array(entries) => {
                    for entry in entries.iter_mut() {
                        sanitize_schema(entry);
                    }
                }
                entry => sanitize_schema(entry),
            },
            _ => {}
        }
    }
}

// Response structures for the Gemini API

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<GeminiUsage>,
    #[serde(rename = "modelVersion")]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiUsage {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: u32,
    #[serde(rename = "totalTokenCount", default)]
    total_token_count: u32,
}
