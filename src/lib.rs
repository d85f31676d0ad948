//! VPN Commander - Assistant Backend Library
//!
//! Backend for the VPN Commander dashboard. It includes:
//! - The three assistant flows (analyze, explain, plan) over a
//!   schema-constrained LLM provider
//! - The action layer the dashboard forms call into
//! - The session audit store seam and its stub implementation
//! - Data models and configuration

pub mod actions;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export commonly used items
pub use actions::{analyze_action, explain_action, plan_action};
pub use models::response::ActionResult;
pub use models::{
    AnalyzeInput, AnalyzeOutput, ExplainInput, ExplainOutput, PlanInput, PlanOutput,
};
pub use services::flows::Assistant;
pub use services::sessions::{
    CallerIdentity, MemorySessionStore, NullSessionStore, SessionStore,
};
pub use storage::config::{AssistantConfig, ConfigService};
pub use utils::error::{AppError, AppResult};
