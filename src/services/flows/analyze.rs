//! Analyze Flow
//!
//! Analyzes server logs and configuration against the caller's goal,
//! producing findings and actionable fixes.

use tracing::info;

use super::{require_conformant, Assistant};
use crate::models::assistant::{AnalyzeInput, AnalyzeOutput, ServerContext};
use crate::services::prompt::render_template;
use crate::services::sessions::CallerIdentity;
use crate::utils::error::AppResult;

/// Goal recorded in the session when the caller leaves theirs blank
const DEFAULT_GOAL: &str = "general analysis";

const ANALYZE_PROMPT: &str = "Context:
- OS: {{context.os}}, Role: {{context.role}}, Region: {{context.region}}, Plan: {{context.plan}}
Goal: {{goal}}

Inputs:
- Server Logs (masked): <<<LOGS_START>>>{{serverLogs}}<<<LOGS_END>>>
- Server Config (masked): <<<CONF_START>>>{{serverConfig}}<<<CONF_END>>>

Constraints:
- Idempotent fixes when possible.
- Use safe defaults and reference docs if needed.
";

fn render_prompt(input: &AnalyzeInput) -> String {
    let context = input.context.clone().unwrap_or_default();
    let ServerContext {
        os,
        role,
        region,
        plan,
    } = context;
    render_template(
        ANALYZE_PROMPT,
        &[
            ("context.os", os.as_deref().unwrap_or("")),
            ("context.role", role.as_deref().unwrap_or("")),
            ("context.region", region.as_deref().unwrap_or("")),
            ("context.plan", plan.as_deref().unwrap_or("")),
            ("goal", &input.goal),
            ("serverLogs", &input.server_logs),
            ("serverConfig", &input.server_config),
        ],
    )
}

impl Assistant {
    /// Analyze server logs and configuration based on the caller's goal.
    pub async fn analyze(
        &self,
        caller: &CallerIdentity,
        input: AnalyzeInput,
    ) -> AppResult<AnalyzeOutput> {
        input.validate()?;

        let goal = if input.goal.is_empty() {
            DEFAULT_GOAL
        } else {
            input.goal.as_str()
        };
        let model = self.config().fast_model.clone();

        let context = serde_json::to_value(&input.context)?;
        let session = self.open_session(caller, goal, context, &model).await;
        self.record_input(session.as_deref(), &input).await;

        let prompt = render_prompt(&input);
        let (output, latency_ms): (AnalyzeOutput, u64) = self.generate(&model, prompt).await?;
        require_conformant(output.validate())?;

        self.record_result(session.as_deref(), &output, latency_ms).await;
        info!(
            latency_ms,
            findings = output.findings.len(),
            fixes = output.fixes.len(),
            "analysis complete"
        );
        Ok(output)
    }
}
