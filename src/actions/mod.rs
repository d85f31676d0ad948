//! Action Layer
//!
//! The boundary the dashboard forms call into. Each action takes untrusted
//! JSON, checks it against the flow's own schema (the one definition shared
//! with the flow), and converts every failure into the uniform
//! `{ data, error }` envelope. No error ever escapes an action.

use serde::de::DeserializeOwned;

use crate::models::assistant::{
    AnalyzeInput, AnalyzeOutput, ExplainInput, ExplainOutput, PlanInput, PlanOutput,
};
use crate::models::response::ActionResult;
use crate::services::flows::Assistant;
use crate::services::sessions::CallerIdentity;
use crate::utils::error::{AppError, AppResult};

/// Message returned for any input that fails the flow schema
const INVALID_INPUT: &str = "Invalid input.";

/// Message substituted when an error formats to an empty string
const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

/// Parse untrusted JSON against a flow input type.
fn parse_input<T>(input: serde_json::Value, validate: impl Fn(&T) -> AppResult<()>) -> Option<T>
where
    T: DeserializeOwned,
{
    let parsed: T = serde_json::from_value(input).ok()?;
    validate(&parsed).ok()?;
    Some(parsed)
}

/// Format a flow error for the envelope.
fn failure_message(error: AppError) -> String {
    let message = error.to_string();
    if message.is_empty() {
        UNEXPECTED_ERROR.to_string()
    } else {
        message
    }
}

/// Analyze server logs and configuration.
pub async fn analyze_action(
    assistant: &Assistant,
    caller: &CallerIdentity,
    input: serde_json::Value,
) -> ActionResult<AnalyzeOutput> {
    let Some(input) = parse_input(input, AnalyzeInput::validate) else {
        return ActionResult::err(INVALID_INPUT);
    };

    match assistant.analyze(caller, input).await {
        Ok(output) => ActionResult::ok(output),
        Err(e) => ActionResult::err(failure_message(e)),
    }
}

/// Explain a finding from a previous analysis.
pub async fn explain_action(
    assistant: &Assistant,
    caller: &CallerIdentity,
    input: serde_json::Value,
) -> ActionResult<ExplainOutput> {
    let Some(input) = parse_input(input, ExplainInput::validate) else {
        return ActionResult::err(INVALID_INPUT);
    };

    match assistant.explain(caller, input).await {
        Ok(output) => ActionResult::ok(output),
        Err(e) => ActionResult::err(failure_message(e)),
    }
}

/// Generate a hardening plan.
pub async fn plan_action(
    assistant: &Assistant,
    caller: &CallerIdentity,
    input: serde_json::Value,
) -> ActionResult<PlanOutput> {
    let Some(input) = parse_input(input, PlanInput::validate) else {
        return ActionResult::err(INVALID_INPUT);
    };

    match assistant.plan(caller, input).await {
        Ok(output) => ActionResult::ok(output),
        Err(e) => ActionResult::err(failure_message(e)),
    }
}
