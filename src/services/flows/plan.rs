//! Plan Flow
//!
//! Generates a hardening checklist for a desired security level and server
//! context. Fills in a `hp_`-prefixed plan id when the model omits one.

use tracing::info;

use super::{require_conformant, Assistant};
use crate::models::assistant::{PlanInput, PlanOutput};
use crate::services::prompt::render_template;
use crate::services::sessions::CallerIdentity;
use crate::utils::error::AppResult;
use crate::utils::ids;

const PLAN_PROMPT: &str = "Context: OS {{context.os}}, Role {{context.role}}, Level {{level}}, Features {{context.features}}
Return a hardened checklist with explicit commands.";

fn render_prompt(input: &PlanInput) -> String {
    let features = input.context.features.join(",");
    render_template(
        PLAN_PROMPT,
        &[
            ("context.os", &input.context.os),
            ("context.role", &input.context.role),
            ("level", &input.level.to_string()),
            ("context.features", &features),
        ],
    )
}

impl Assistant {
    /// Generate a hardening plan for the requested level.
    pub async fn plan(&self, caller: &CallerIdentity, input: PlanInput) -> AppResult<PlanOutput> {
        input.validate()?;

        let goal = format!("Generate {} hardening plan.", input.level);
        let model = self.config().planning_model.clone();

        let context = serde_json::to_value(&input.context)?;
        let session = self.open_session(caller, &goal, context, &model).await;
        self.record_input(session.as_deref(), &input).await;

        let prompt = render_prompt(&input);
        let (mut output, latency_ms): (PlanOutput, u64) = self.generate(&model, prompt).await?;

        // An upstream planId is preserved verbatim; only an absent one is filled.
        if output.plan_id.is_empty() {
            output.plan_id = ids::plan_id();
        }
        require_conformant(output.validate())?;

        self.record_result(session.as_deref(), &output, latency_ms).await;
        info!(
            latency_ms,
            plan_id = %output.plan_id,
            tasks = output.tasks.len(),
            "hardening plan complete"
        );
        Ok(output)
    }
}
