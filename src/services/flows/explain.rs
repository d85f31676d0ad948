//! Explain Flow
//!
//! Explains a specific finding in the context of the server it was raised
//! against, with risks, alternatives, and platform commands.

use tracing::info;

use super::{require_conformant, Assistant};
use crate::models::assistant::{ExplainInput, ExplainOutput};
use crate::services::prompt::render_template;
use crate::services::sessions::CallerIdentity;
use crate::utils::error::AppResult;

const EXPLAIN_PROMPT: &str = "Explain the finding with ID '{{findingId}}' in the context of a server with OS '{{context.os}}' and role '{{context.role}}'. Be clear and provide actionable advice.";

fn render_prompt(input: &ExplainInput) -> String {
    render_template(
        EXPLAIN_PROMPT,
        &[
            ("findingId", &input.finding_id),
            ("context.os", input.context.os.as_deref().unwrap_or("")),
            ("context.role", input.context.role.as_deref().unwrap_or("")),
        ],
    )
}

impl Assistant {
    /// Explain a finding identified by a previous analysis.
    pub async fn explain(
        &self,
        caller: &CallerIdentity,
        input: ExplainInput,
    ) -> AppResult<ExplainOutput> {
        input.validate()?;

        let goal = format!("Explain finding '{}'.", input.finding_id);
        let model = self.config().fast_model.clone();

        let context = serde_json::to_value(&input.context)?;
        let session = self.open_session(caller, &goal, context, &model).await;
        self.record_input(session.as_deref(), &input).await;

        let prompt = render_prompt(&input);
        let (output, latency_ms): (ExplainOutput, u64) = self.generate(&model, prompt).await?;
        require_conformant(output.validate())?;

        self.record_result(session.as_deref(), &output, latency_ms).await;
        info!(latency_ms, finding_id = %output.finding_id, "explanation complete");
        Ok(output)
    }
}
