//! AI Session Store
//!
//! Audit/analytics records correlating a caller, a goal, and the resulting
//! AI interaction. The store is an external dependency that can fail
//! independently of the model call; flows treat it as best-effort telemetry
//! and never let a store failure abort the user-visible result.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::error::AppResult;
use crate::utils::ids;

/// Identity of the caller a flow runs on behalf of.
///
/// Threaded through explicitly from the caller's auth context; flows never
/// substitute a fixed placeholder id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub user_id: String,
}

impl CallerIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// External store for AI session records
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a new session record and return its id (`sess_xxxxxxxx`)
    async fn create_session(
        &self,
        user_id: &str,
        goal: &str,
        context: serde_json::Value,
        model: &str,
    ) -> AppResult<String>;

    /// Store the caller's raw input against a session
    async fn save_user_input(
        &self,
        session_id: &str,
        input: serde_json::Value,
    ) -> AppResult<()>;

    /// Store a validated flow result and its measured latency
    async fn save_result(
        &self,
        session_id: &str,
        result: serde_json::Value,
        latency_ms: u64,
    ) -> AppResult<()>;
}

/// Placeholder store: generates ids and logs, persists nothing.
///
/// Stands in for the real session database, which lives outside this
/// codebase.
#[derive(Debug, Default)]
pub struct NullSessionStore;

impl NullSessionStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionStore for NullSessionStore {
    async fn create_session(
        &self,
        user_id: &str,
        goal: &str,
        _context: serde_json::Value,
        model: &str,
    ) -> AppResult<String> {
        let session_id = ids::session_id();
        debug!(%session_id, user_id, goal, model, "created AI session (stub store)");
        Ok(session_id)
    }

    async fn save_user_input(
        &self,
        session_id: &str,
        _input: serde_json::Value,
    ) -> AppResult<()> {
        debug!(session_id, "saving user input (stub store)");
        Ok(())
    }

    async fn save_result(
        &self,
        session_id: &str,
        _result: serde_json::Value,
        latency_ms: u64,
    ) -> AppResult<()> {
        debug!(session_id, latency_ms, "saving result (stub store)");
        Ok(())
    }
}

/// A recorded store operation, in call order
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Created {
        session_id: String,
        user_id: String,
        goal: String,
        context: serde_json::Value,
        model: String,
        created_at: DateTime<Utc>,
    },
    UserInput {
        session_id: String,
        input: serde_json::Value,
    },
    Result {
        session_id: String,
        result: serde_json::Value,
        latency_ms: u64,
    },
}

/// In-memory store used by tests to assert ordering and captured payloads
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    events: Mutex<Vec<SessionEvent>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, in call order
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Ids of all sessions created so far
    pub fn session_ids(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SessionEvent::Created { session_id, .. } => Some(session_id),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create_session(
        &self,
        user_id: &str,
        goal: &str,
        context: serde_json::Value,
        model: &str,
    ) -> AppResult<String> {
        let session_id = ids::session_id();
        self.events.lock().unwrap().push(SessionEvent::Created {
            session_id: session_id.clone(),
            user_id: user_id.to_string(),
            goal: goal.to_string(),
            context,
            model: model.to_string(),
            created_at: Utc::now(),
        });
        Ok(session_id)
    }

    async fn save_user_input(
        &self,
        session_id: &str,
        input: serde_json::Value,
    ) -> AppResult<()> {
        self.events.lock().unwrap().push(SessionEvent::UserInput {
            session_id: session_id.to_string(),
            input,
        });
        Ok(())
    }

    async fn save_result(
        &self,
        session_id: &str,
        result: serde_json::Value,
        latency_ms: u64,
    ) -> AppResult<()> {
        self.events.lock().unwrap().push(SessionEvent::Result {
            session_id: session_id.to_string(),
            result,
            latency_ms,
        });
        Ok(())
    }
}
