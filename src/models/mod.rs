//! Data Models
//!
//! Flow contracts, fleet records, and the action result envelope.

pub mod assistant;
pub mod fleet;
pub mod response;

pub use assistant::{
    AnalyzeInput, AnalyzeOutput, CommandSet, Confidence, ExplainContext, ExplainInput,
    ExplainOutput, Finding, FindingType, Fix, HardeningLevel, HardeningTask, PlanContext,
    PlanInput, PlanOutput, Severity, ServerContext,
};
pub use fleet::{
    ProvisionPlan, ProvisionRun, RunStatus, RunStep, Server, ServerRole, ServerStatus, StepStatus,
    VersionPin,
};
pub use response::ActionResult;
