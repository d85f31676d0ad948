//! Plan Flow Integration Tests
//!
//! Covers plan id preservation and generation, per-flow model selection, and
//! session independence across repeated calls.

use std::sync::Arc;

use vpn_commander::models::assistant::{HardeningLevel, PlanContext, PlanInput};
use vpn_commander::services::sessions::SessionEvent;
use vpn_commander::MemorySessionStore;
use vpn_commander_llm::MockProvider;

use crate::common::{assistant_with, caller, plan_output_json};

fn strict_input() -> PlanInput {
    PlanInput {
        level: HardeningLevel::Strict,
        context: PlanContext {
            os: "Ubuntu 22.04".to_string(),
            role: "edge".to_string(),
            features: vec!["wireguard".to_string()],
        },
    }
}

#[tokio::test]
async fn plan_preserves_an_upstream_plan_id_verbatim() {
    let mock = Arc::new(MockProvider::with_response(plan_output_json(Some(
        "hp_custom42",
    ))));
    let store = Arc::new(MemorySessionStore::new());
    let assistant = assistant_with(mock, store);

    let output = assistant.plan(&caller(), strict_input()).await.unwrap();
    assert_eq!(output.plan_id, "hp_custom42");
}

#[tokio::test]
async fn plan_generates_an_id_when_the_model_omits_it() {
    let mock = Arc::new(MockProvider::with_response(plan_output_json(None)));
    let store = Arc::new(MemorySessionStore::new());
    let assistant = assistant_with(mock, store);

    let output = assistant.plan(&caller(), strict_input()).await.unwrap();

    assert!(output.plan_id.starts_with("hp_"));
    let suffix = &output.plan_id["hp_".len()..];
    assert_eq!(suffix.len(), 6);
    assert!(suffix
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    assert_eq!(output.tasks.len(), 1);
}

#[tokio::test]
async fn plan_uses_the_planning_model() {
    let mock = Arc::new(MockProvider::with_response(plan_output_json(None)));
    let store = Arc::new(MemorySessionStore::new());
    let assistant = assistant_with(mock.clone(), store.clone());

    assistant.plan(&caller(), strict_input()).await.unwrap();

    let request = &mock.requests()[0];
    assert_eq!(request.model_override.as_deref(), Some("gemini-1.5-pro"));
    assert!(request.prompt.contains("Level strict"));
    assert!(request.prompt.contains("Features wireguard"));

    match &store.events()[0] {
        SessionEvent::Created { goal, model, .. } => {
            assert_eq!(goal, "Generate strict hardening plan.");
            assert_eq!(model, "gemini-1.5-pro");
        }
        other => panic!("expected Created, got {:?}", other),
    }
}

#[tokio::test]
async fn repeated_plans_get_independent_sessions() {
    let mock = Arc::new(MockProvider::new());
    mock.push_response(plan_output_json(None));
    mock.push_response(plan_output_json(None));
    let store = Arc::new(MemorySessionStore::new());
    let assistant = assistant_with(mock, store.clone());

    assistant.plan(&caller(), strict_input()).await.unwrap();
    assistant.plan(&caller(), strict_input()).await.unwrap();

    let ids = store.session_ids();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

#[tokio::test]
async fn plan_records_result_with_the_filled_id() {
    let mock = Arc::new(MockProvider::with_response(plan_output_json(None)));
    let store = Arc::new(MemorySessionStore::new());
    let assistant = assistant_with(mock, store.clone());

    let output = assistant.plan(&caller(), strict_input()).await.unwrap();

    let events = store.events();
    match events.last().unwrap() {
        SessionEvent::Result { result, .. } => {
            assert_eq!(result["planId"], serde_json::json!(output.plan_id));
        }
        other => panic!("expected Result last, got {:?}", other),
    }
}
