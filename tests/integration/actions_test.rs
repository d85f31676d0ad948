//! Action Layer Integration Tests
//!
//! The action wrappers never throw: invalid input short-circuits with the
//! fixed message and no model call; flow failures surface as envelope errors.

use std::sync::Arc;

use vpn_commander::{analyze_action, explain_action, plan_action};
use vpn_commander::MemorySessionStore;
use vpn_commander_llm::{LlmError, MockProvider};

use crate::common::{
    analyze_input_json, analyze_output_json, assistant_with, caller, explain_output_json,
    plan_input_json, plan_output_json,
};

#[tokio::test]
async fn analyze_action_returns_data_for_valid_input() {
    let mock = Arc::new(MockProvider::with_response(analyze_output_json()));
    let store = Arc::new(MemorySessionStore::new());
    let assistant = assistant_with(mock, store);

    let result = analyze_action(&assistant, &caller(), analyze_input_json()).await;

    assert!(result.is_ok());
    assert!(result.error.is_none());
    let output = result.data.unwrap();
    assert!(output.findings[0].evidence.contains("acme"));
}

#[tokio::test]
async fn analyze_action_rejects_missing_server_config() {
    let mock = Arc::new(MockProvider::with_response(analyze_output_json()));
    let store = Arc::new(MemorySessionStore::new());
    let assistant = assistant_with(mock.clone(), store.clone());

    let result = analyze_action(
        &assistant,
        &caller(),
        serde_json::json!({ "serverLogs": "log line", "goal": "fix acme" }),
    )
    .await;

    assert!(result.data.is_none());
    assert_eq!(result.error.as_deref(), Some("Invalid input."));
    // The model is never invoked and no session is opened
    assert_eq!(mock.call_count(), 0);
    assert!(store.events().is_empty());
}

#[tokio::test]
async fn plan_action_rejects_unknown_level() {
    let mock = Arc::new(MockProvider::with_response(plan_output_json(None)));
    let store = Arc::new(MemorySessionStore::new());
    let assistant = assistant_with(mock.clone(), store);

    let result = plan_action(&assistant, &caller(), plan_input_json("extreme")).await;

    assert!(result.data.is_none());
    assert_eq!(result.error.as_deref(), Some("Invalid input."));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn plan_action_returns_plan_with_id() {
    let mock = Arc::new(MockProvider::with_response(plan_output_json(None)));
    let store = Arc::new(MemorySessionStore::new());
    let assistant = assistant_with(mock, store);

    let result = plan_action(&assistant, &caller(), plan_input_json("moderate")).await;

    let output = result.data.unwrap();
    assert!(output.plan_id.starts_with("hp_"));
    assert!(!output.tasks.is_empty());
}

#[tokio::test]
async fn explain_action_round_trips_the_finding_id() {
    let mock = Arc::new(MockProvider::with_response(explain_output_json(
        "F-ACME-HTTP01",
    )));
    let store = Arc::new(MemorySessionStore::new());
    let assistant = assistant_with(mock, store);

    let result = explain_action(
        &assistant,
        &caller(),
        serde_json::json!({
            "findingId": "F-ACME-HTTP01",
            "context": { "os": "Ubuntu 22.04", "role": "edge" }
        }),
    )
    .await;

    assert_eq!(result.data.unwrap().finding_id, "F-ACME-HTTP01");
}

#[tokio::test]
async fn actions_surface_flow_errors_as_messages() {
    let mock = Arc::new(MockProvider::new());
    mock.push_error(LlmError::ServerError {
        message: "backend unavailable".to_string(),
        status: Some(503),
    });
    let store = Arc::new(MemorySessionStore::new());
    let assistant = assistant_with(mock, store);

    let result = analyze_action(&assistant, &caller(), analyze_input_json()).await;

    assert!(result.data.is_none());
    let message = result.error.unwrap();
    assert!(message.contains("backend unavailable"));
}

#[tokio::test]
async fn actions_never_panic_on_wrong_json_shapes() {
    let mock = Arc::new(MockProvider::with_response(analyze_output_json()));
    let store = Arc::new(MemorySessionStore::new());
    let assistant = assistant_with(mock.clone(), store);

    for bad in [
        serde_json::json!(null),
        serde_json::json!("a string"),
        serde_json::json!([1, 2, 3]),
        serde_json::json!({ "level": 3, "context": {} }),
    ] {
        let result = plan_action(&assistant, &caller(), bad).await;
        assert_eq!(result.error.as_deref(), Some("Invalid input."));
    }
    assert_eq!(mock.call_count(), 0);
}
