//! Assistant Flow Contracts
//!
//! Input and output records for the three assistant flows. The types are the
//! schema: closed enums and required fields make deserialization the
//! structural check, and each record's `validate()` covers what the type
//! system cannot (non-empty required text, well-formed reference URLs).
//!
//! The same definitions back both the action-layer boundary check and the
//! flow's own contract, so the two can never drift apart. Output types also
//! derive `JsonSchema`; the generated schema is sent to the provider as the
//! response constraint.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};

/// Severity / impact rating shared by findings, fixes, and hardening tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Overall confidence in an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Category of an identified finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FindingType {
    Misconfig,
    Policy,
    Perf,
    Security,
}

/// Desired hardening level for a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HardeningLevel {
    Moderate,
    Strict,
}

impl std::fmt::Display for HardeningLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HardeningLevel::Moderate => write!(f, "moderate"),
            HardeningLevel::Strict => write!(f, "strict"),
        }
    }
}

/// Server context accompanying an analysis request
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ServerContext {
    /// Operating system, e.g. "Ubuntu 22.04"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    /// Server role, e.g. "edge"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Server region, e.g. "US: NY"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Name of the provisioning plan applied, e.g. "Standard WireGuard Edge"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
}

/// Input to the analyze flow
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeInput {
    /// Raw, masked logs from the server
    pub server_logs: String,
    /// Raw, masked configuration from the server (e.g. wg0.conf, sysctl)
    pub server_config: String,
    /// The user's stated goal, e.g. "reduce RTT", "fix acme"
    pub goal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ServerContext>,
}

impl AnalyzeInput {
    pub fn validate(&self) -> AppResult<()> {
        if self.server_logs.is_empty() {
            return Err(AppError::validation("serverLogs must not be empty"));
        }
        if self.server_config.is_empty() {
            return Err(AppError::validation("serverConfig must not be empty"));
        }
        Ok(())
    }
}

/// An identified issue in server logs or configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    /// Unique identifier, e.g. "F-ACME-HTTP01"
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FindingType,
    pub severity: Severity,
    /// Evidence from the logs or config supporting the finding
    pub evidence: String,
    /// True when the finding is uncertain and needs manual verification
    pub requires_check: bool,
}

/// An actionable remediation for a finding
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Fix {
    /// Unique identifier, e.g. "FX-UFW-80"
    pub id: String,
    /// Short descriptive title, e.g. "Open HTTP-01 temporarily"
    pub title: String,
    /// Command to apply the fix on a POSIX shell
    pub bash: String,
    /// Command to apply the fix on PowerShell
    pub powershell: String,
    /// Command to revert the fix
    pub revert: String,
    pub impact: Severity,
    /// Documentation URLs
    pub references: Vec<String>,
}

impl Fix {
    fn validate(&self) -> AppResult<()> {
        for reference in &self.references {
            url::Url::parse(reference).map_err(|_| {
                AppError::validation(format!("reference is not a valid URL: {}", reference))
            })?;
        }
        Ok(())
    }
}

/// Output of the analyze flow
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeOutput {
    /// Concise summary of the analysis
    pub summary: String,
    pub findings: Vec<Finding>,
    pub fixes: Vec<Fix>,
    pub confidence: Confidence,
}

impl AnalyzeOutput {
    pub fn validate(&self) -> AppResult<()> {
        for fix in &self.fixes {
            fix.validate()?;
        }
        Ok(())
    }
}

/// Server context accompanying an explain request
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExplainContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Input to the explain flow
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExplainInput {
    /// The finding to explain, e.g. "F-ACME-HTTP01"
    pub finding_id: String,
    pub context: ExplainContext,
}

impl ExplainInput {
    pub fn validate(&self) -> AppResult<()> {
        if self.finding_id.is_empty() {
            return Err(AppError::validation("findingId must not be empty"));
        }
        Ok(())
    }
}

/// Platform-specific command lists for an explanation
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CommandSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bash: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub powershell: Option<Vec<String>>,
}

/// Output of the explain flow
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExplainOutput {
    /// Echoes the requested finding id
    pub finding_id: String,
    pub explanation: String,
    pub risks: Vec<String>,
    pub alternatives: Vec<String>,
    pub commands: CommandSet,
}

impl ExplainOutput {
    pub fn validate(&self) -> AppResult<()> {
        if self.finding_id.is_empty() {
            return Err(AppError::validation("findingId must not be empty"));
        }
        Ok(())
    }
}

/// Server context accompanying a plan request
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlanContext {
    /// Operating system, e.g. "Ubuntu 22.04"
    pub os: String,
    /// Server role, e.g. "edge"
    pub role: String,
    /// Features enabled on the server, e.g. ["wireguard"]
    pub features: Vec<String>,
}

/// Input to the plan flow
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlanInput {
    pub level: HardeningLevel,
    pub context: PlanContext,
}

impl PlanInput {
    pub fn validate(&self) -> AppResult<()> {
        if self.context.os.is_empty() {
            return Err(AppError::validation("context.os must not be empty"));
        }
        if self.context.role.is_empty() {
            return Err(AppError::validation("context.role must not be empty"));
        }
        Ok(())
    }
}

/// A single hardening checklist item
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HardeningTask {
    /// Unique identifier, e.g. "H-SSH-KeyOnly"
    pub id: String,
    /// Short descriptive title, e.g. "SSH key-only"
    pub title: String,
    /// Command to perform the task on a POSIX shell
    pub bash: String,
    /// Command to perform the task on PowerShell
    pub powershell: String,
    pub impact: Severity,
}

/// Output of the plan flow
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanOutput {
    /// Unique plan identifier; filled in flow-side when the model omits it
    #[serde(default)]
    pub plan_id: String,
    pub tasks: Vec<HardeningTask>,
}

impl PlanOutput {
    /// Validate a finalized plan (after any flow-side id fill)
    pub fn validate(&self) -> AppResult<()> {
        if self.plan_id.is_empty() {
            return Err(AppError::validation("planId must not be empty"));
        }
        Ok(())
    }
}
