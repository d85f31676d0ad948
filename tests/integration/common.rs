//! Shared helpers for the integration tests

use std::sync::Arc;

use async_trait::async_trait;

use vpn_commander::services::flows::Assistant;
use vpn_commander::services::sessions::{
    CallerIdentity, MemorySessionStore, SessionStore,
};
use vpn_commander::storage::config::AssistantConfig;
use vpn_commander::utils::error::{AppError, AppResult};
use vpn_commander_llm::MockProvider;

/// Caller used across tests
pub fn caller() -> CallerIdentity {
    CallerIdentity::new("user-test-1")
}

/// Assistant over a scripted provider and an in-memory store
pub fn assistant_with(mock: Arc<MockProvider>, store: Arc<MemorySessionStore>) -> Assistant {
    Assistant::new(mock, store, AssistantConfig::default())
}

/// A store whose every operation fails, for best-effort persistence tests
pub struct FailingSessionStore;

#[async_trait]
impl SessionStore for FailingSessionStore {
    async fn create_session(
        &self,
        _user_id: &str,
        _goal: &str,
        _context: serde_json::Value,
        _model: &str,
    ) -> AppResult<String> {
        Err(AppError::session("store offline"))
    }

    async fn save_user_input(
        &self,
        _session_id: &str,
        _input: serde_json::Value,
    ) -> AppResult<()> {
        Err(AppError::session("store offline"))
    }

    async fn save_result(
        &self,
        _session_id: &str,
        _result: serde_json::Value,
        _latency_ms: u64,
    ) -> AppResult<()> {
        Err(AppError::session("store offline"))
    }
}

/// A conformant analyze response for the acme scenario
pub fn analyze_output_json() -> serde_json::Value {
    serde_json::json!({
        "summary": "WireGuard up, ACME failing due to HTTP-01 port block.",
        "findings": [{
            "id": "F-ACME-HTTP01",
            "type": "misconfig",
            "severity": "high",
            "evidence": "acme: connection refused :80",
            "requires_check": false
        }],
        "fixes": [{
            "id": "FX-UFW-80",
            "title": "Open HTTP-01 temporarily",
            "bash": "ufw allow 80/tcp",
            "powershell": "New-NetFirewallRule -DisplayName 'HTTP-01' -Direction Inbound -LocalPort 80 -Protocol TCP -Action Allow",
            "revert": "ufw deny 80/tcp",
            "impact": "low",
            "references": ["https://letsencrypt.org/docs/challenge-types/"]
        }],
        "confidence": "high"
    })
}

/// The acme scenario analyze input, as untrusted JSON
pub fn analyze_input_json() -> serde_json::Value {
    serde_json::json!({
        "serverLogs": "acme: connection refused :80",
        "serverConfig": "wg0.conf contents",
        "goal": "fix acme",
        "context": { "os": "Ubuntu 22.04", "role": "edge" }
    })
}

/// A conformant explain response echoing the given finding id
pub fn explain_output_json(finding_id: &str) -> serde_json::Value {
    serde_json::json!({
        "findingId": finding_id,
        "explanation": "HTTP-01 requires inbound TCP/80 from Let's Encrypt validation servers.",
        "risks": ["Port 80 stays exposed if the rule is not reverted after issuance"],
        "alternatives": ["Switch to DNS-01 validation"],
        "commands": {
            "bash": ["ufw allow 80/tcp"],
            "powershell": ["New-NetFirewallRule -LocalPort 80 -Protocol TCP -Action Allow"]
        }
    })
}

/// A conformant plan response; `plan_id` of `None` omits the field
pub fn plan_output_json(plan_id: Option<&str>) -> serde_json::Value {
    let mut output = serde_json::json!({
        "tasks": [{
            "id": "H-SSH-KeyOnly",
            "title": "SSH key-only",
            "bash": "sed -i 's/^#*PasswordAuthentication.*/PasswordAuthentication no/' /etc/ssh/sshd_config && systemctl reload sshd",
            "powershell": "Set-ItemProperty -Path 'HKLM:\\SOFTWARE\\OpenSSH' -Name PasswordAuthentication -Value 0",
            "impact": "medium"
        }]
    });
    if let Some(id) = plan_id {
        output["planId"] = serde_json::json!(id);
    }
    output
}

/// A valid plan input, as untrusted JSON
pub fn plan_input_json(level: &str) -> serde_json::Value {
    serde_json::json!({
        "level": level,
        "context": {
            "os": "Ubuntu 22.04",
            "role": "edge",
            "features": ["wireguard"]
        }
    })
}
