//! Fleet Records
//!
//! Typed records for the server fleet the dashboard visualizes: servers,
//! provisioning runs, and provisioning plans. These are read-model types;
//! the provisioning engine that produces them is an external system.

use serde::{Deserialize, Serialize};

use super::assistant::HardeningLevel;

/// Role a server plays in the fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerRole {
    Edge,
    Relay,
    Gateway,
}

/// Lifecycle status of a server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerStatus {
    Ready,
    Provisioning,
    Failed,
}

/// A managed VPN server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub id: String,
    pub hostname: String,
    pub region: String,
    pub role: ServerRole,
    pub status: ServerStatus,
    /// VPN engines deployed on the host, e.g. ["wireguard"]
    pub engines: Vec<String>,
    pub public_ip: String,
    pub os: String,
    pub arch: String,
}

/// Status of a provisioning run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Ready,
    Provisioning,
    Failed,
    Pending,
}

/// Status of a single step within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    Completed,
    InProgress,
    Failed,
    Pending,
}

/// One step of a provisioning run, with its log excerpt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStep {
    pub name: String,
    pub status: StepStatus,
    pub log: String,
}

/// A provisioning run executed against a server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionRun {
    pub id: String,
    pub server_id: String,
    pub server_hostname: String,
    pub plan: String,
    pub status: RunStatus,
    pub started_at: String,
    pub correlation_id: String,
    pub steps: Vec<RunStep>,
}

impl ProvisionRun {
    /// Fraction of steps completed, in `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        let completed = self
            .steps
            .iter()
            .filter(|s| s.status == StepStatus::Completed)
            .count();
        completed as f64 / self.steps.len() as f64
    }
}

/// A pinned package version within a provisioning plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionPin {
    pub name: String,
    pub version: String,
}

/// A reusable provisioning plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionPlan {
    pub id: String,
    pub name: String,
    pub steps: Vec<String>,
    pub os_family: String,
    pub version_pins: Vec<VersionPin>,
    pub hardening_level: HardeningLevel,
}
