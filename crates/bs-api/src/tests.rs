use std::sync::Arc;
use std::thread;

use bs_core::{Choice, Node, Settings};
use serde_json::{json, Value};

use super::*;

fn choice(text: &str, target: &str, score: i64) -> Choice {
    Choice {
        text: text.to_string(),
        target_node_id: target.to_string(),
        score,
    }
}

fn node(id: &str, choices: Vec<Choice>) -> Node {
    Node {
        id: id.to_string(),
        content: format!("<p>{}</p>", id),
        choices,
        ..Node::default()
    }
}

fn scenario() -> Scenario {
    Scenario::from_nodes(
        vec![
            node(
                "intro",
                vec![choice("Help", "helped", 50), choice("Wait", "waited", 10)],
            ),
            node("waited", vec![choice("Help late", "helped", 20)]),
            node("helped", Vec::new()),
        ],
        "intro",
        Settings {
            enable_undo: true,
            enable_scoring: true,
            enable_reset_activity: true,
            max_score: 60.0,
            ..Settings::default()
        },
    )
}

fn host_with(sink: Option<Arc<dyn EventSink>>) -> ScenarioHost {
    ScenarioHost::new(ScenarioHostOptions {
        scenario_id: "course-1/block-1".to_string(),
        scenario: scenario(),
        progress_store: None,
        event_sink: sink,
        limits: None,
    })
}

#[test]
fn first_access_starts_at_start_node() {
    let host = host_with(None);
    let view = host.get_current_state("ada").expect("state");
    assert_eq!(view.current_node.id, "intro");
    assert_eq!(view.history_length, 0);
    assert_eq!(view.score, None);
}

#[test]
fn operations_persist_per_learner() {
    let host = host_with(None);
    host.select_choice("ada", 1).expect("ada waits");
    let bob = host.get_current_state("bob").expect("bob");
    assert_eq!(bob.current_node.id, "intro");

    let ada = host.select_choice("ada", 0).expect("ada helps");
    assert_eq!(ada.current_node.id, "helped");
    assert_eq!(ada.score, Some(30));
    assert!(ada.completed);

    let ada = host.undo_choice("ada").expect("undo");
    assert_eq!(ada.current_node.id, "waited");
    let ada = host.reset_activity("ada").expect("reset");
    assert_eq!(ada.current_node.id, "intro");
    assert_eq!(ada.history_length, 0);
}

#[test]
fn failed_operation_keeps_stored_progress() {
    let host = host_with(None);
    host.select_choice("ada", 1).expect("wait");
    let error = host.select_choice("ada", 7).expect_err("bad index");
    assert_eq!(error.kind, ErrorKind::InvalidChoice);
    let view = host.get_current_state("ada").expect("state");
    assert_eq!(view.current_node.id, "waited");
    assert_eq!(view.history_length, 1);
}

#[test]
fn events_reach_the_sink() {
    let sink = Arc::new(RecordingEventSink::new());
    let host = host_with(Some(sink.clone()));
    host.select_choice("ada", 0).expect("help");
    let events = sink.take();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].0, host.key("ada"));
    assert!(matches!(events[0].1, EngineEvent::Grade(grade) if grade.value == 50));
    assert!(matches!(
        events[1].1,
        EngineEvent::Completion { completion } if completion == 1.0
    ));
}

#[test]
fn rejected_save_keeps_previous_scenario() {
    let host = host_with(None);
    host.select_choice("ada", 1).expect("wait");

    let draft: ScenarioDraft = serde_json::from_value(json!({
        "nodes": [{
            "id": "temp-1",
            "content": "Only node",
            "choices": [{"text": "Nowhere", "target_node_id": "does-not-exist"}]
        }]
    }))
    .expect("draft");
    let outcome = host.save_scenario(&draft);
    assert!(!outcome.success);
    assert!(outcome.errors[0].contains("Invalid target does-not-exist"));
    assert!(outcome
        .field_errors
        .contains_key("nodes[0].choices[0].target_node_id"));

    assert_eq!(host.scenario().revision, 0);
    let view = host.get_current_state("ada").expect("state");
    assert_eq!(view.current_node.id, "waited");
}

#[test]
fn saving_more_than_thirty_nodes_fails() {
    let host = host_with(None);
    let nodes = (0..31)
        .map(|index| json!({"id": format!("n{}", index), "content": "x"}))
        .collect::<Vec<_>>();
    let draft: ScenarioDraft = serde_json::from_value(json!({ "nodes": nodes })).expect("draft");
    let outcome = host.save_scenario(&draft);
    assert!(!outcome.success);
    assert_eq!(outcome.field_errors["nodes"], vec!["Too many nodes (max 30)."]);
    assert_eq!(host.scenario().len(), 3);
}

#[test]
fn accepted_save_bumps_revision_and_discards_stale_progress() {
    let host = host_with(None);
    host.select_choice("ada", 1).expect("wait");
    host.get_current_state("bob").expect("bob at intro");

    let draft: ScenarioDraft = serde_json::from_value(json!({
        "nodes": [
            {"id": "intro", "content": "New intro", "choices": [{"text": "Done", "target_node_id": "helped"}]},
            {"id": "helped", "content": "End"}
        ],
        "enable_scoring": false
    }))
    .expect("draft");
    assert!(host.save_scenario(&draft).success);
    assert_eq!(host.scenario().revision, 1);
    assert!(!host.scenario().settings.enable_scoring);
    assert!(host.scenario().settings.enable_undo);

    let ada = host.get_current_state("ada").expect("ada");
    assert_eq!(ada.current_node.id, "intro");
    assert_eq!(ada.history_length, 0);
    assert_eq!(ada.current_node.content, "New intro");

    let bob = host.get_current_state("bob").expect("bob");
    assert_eq!(bob.current_node.id, "intro");
}

#[test]
fn concurrent_learners_do_not_interfere() {
    let host = Arc::new(host_with(None));
    let workers = (0..8)
        .map(|worker| {
            let host = host.clone();
            thread::spawn(move || {
                let learner = format!("learner-{}", worker);
                for _ in 0..25 {
                    host.select_choice(&learner, 1).expect("wait");
                    host.undo_choice(&learner).expect("undo");
                }
                host.select_choice(&learner, 1).expect("wait")
            })
        })
        .collect::<Vec<_>>();

    for worker in workers {
        let view = worker.join().expect("worker should finish");
        assert_eq!(view.current_node.id, "waited");
        assert_eq!(view.history_length, 1);
    }
    assert_eq!(host.lock_count(), 0, "idle learners keep no lock");
}

#[test]
fn concurrent_requests_for_one_learner_are_serialized() {
    let host = Arc::new(host_with(None));
    host.get_current_state("ada").expect("init");
    let workers = (0..4)
        .map(|_| {
            let host = host.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    let _ = host.select_choice("ada", 1);
                    let _ = host.undo_choice("ada");
                }
            })
        })
        .collect::<Vec<_>>();
    for worker in workers {
        worker.join().expect("worker should finish");
    }

    let view = host.get_current_state("ada").expect("state");
    assert!(view.history_length <= 1);
    assert_eq!(view.history_length == 1, view.current_node.id == "waited");
    assert_eq!(host.lock_count(), 0);
}

#[test]
fn memory_store_keeps_latest_progress_per_key() {
    let store = Arc::new(MemoryProgressStore::new());
    let host = ScenarioHost::new(ScenarioHostOptions {
        scenario_id: "s".to_string(),
        scenario: scenario(),
        progress_store: Some(store.clone()),
        event_sink: None,
        limits: None,
    });
    assert!(store.is_empty());
    host.select_choice("ada", 1).expect("wait");
    host.get_current_state("bob").expect("bob");
    assert_eq!(store.len(), 2);

    let stored = store.load(&host.key("ada")).expect("ada stored");
    assert_eq!(stored.revision, 0);
    assert_eq!(stored.progress.current_node_id, "waited");
    assert_eq!(stored.progress.score, 10);
}

#[test]
fn handle_dispatches_json_payloads() {
    let host = host_with(None);
    let state = host.handle("ada", "get_current_state", &json!({}));
    assert_eq!(state["success"], true);
    assert_eq!(state["current_node"]["id"], "intro");

    let chosen = host.handle("ada", "select_choice", &json!({"choice_index": 1}));
    assert_eq!(chosen["current_node"]["id"], "waited");
    assert_eq!(chosen["history_length"], 1);

    let undone = host.handle("ada", "undo_choice", &json!({}));
    assert_eq!(undone["current_node"]["id"], "intro");

    let reset = host.handle("ada", "reset_activity", &Value::Null);
    assert_eq!(reset["success"], true);
}

#[test]
fn handle_reports_malformed_input_and_engine_errors() {
    let host = host_with(None);
    let bad = host.handle("ada", "select_choice", &json!({"choice_index": "first"}));
    assert_eq!(bad["success"], false);
    assert_eq!(bad["code"], "HOST_MALFORMED_INPUT");

    let missing = host.handle("ada", "select_choice", &json!({}));
    assert_eq!(missing["code"], "HOST_MALFORMED_INPUT");

    let unknown = host.handle("ada", "teleport", &json!({}));
    assert_eq!(unknown["code"], "HOST_MALFORMED_INPUT");

    let out_of_range = host.handle("ada", "select_choice", &json!({"choice_index": 9}));
    assert_eq!(out_of_range["code"], "ENGINE_INVALID_CHOICE");

    let fractional = host.handle("ada", "select_choice", &json!({"choice_index": 1.5}));
    assert_eq!(fractional["code"], "HOST_MALFORMED_INPUT");

    let undo = host.handle("ada", "undo_choice", &json!({}));
    assert_eq!(undo["code"], "ENGINE_UNDO_UNAVAILABLE");

    let save = host.handle("ada", "save_scenario", &json!({"nodes": "nope"}));
    assert_eq!(save["success"], false);
    assert_eq!(save["errors"].as_array().map(Vec::len), Some(1));
}

#[test]
fn handle_treats_negative_index_as_invalid_choice() {
    let host = host_with(None);
    for index in [json!(-1), json!(i64::MIN)] {
        let result = host.handle("ada", "select_choice", &json!({ "choice_index": index }));
        assert_eq!(result["success"], false);
        assert_eq!(result["code"], "ENGINE_INVALID_CHOICE");
    }
    let state = host.get_current_state("ada").expect("state");
    assert_eq!(state.current_node.id, "intro");
    assert_eq!(state.history_length, 0);
}

#[test]
fn host_reports_score_overflow_as_failed_choice() {
    let scenario = Scenario::from_nodes(
        vec![node("loop", vec![choice("Again", "loop", i64::MAX / 2 + 1)])],
        "loop",
        Settings::default(),
    );
    let host = ScenarioHost::new(ScenarioHostOptions {
        scenario_id: "unchecked".to_string(),
        scenario,
        progress_store: None,
        event_sink: None,
        limits: None,
    });
    host.select_choice("ada", 0).expect("first lap fits");
    let error = host.select_choice("ada", 0).expect_err("second lap overflows");
    assert_eq!(error.kind, ErrorKind::InvalidChoice);
    assert_eq!(host.get_current_state("ada").expect("state").history_length, 1);
}

#[test]
fn handle_save_round_trips_outcome() {
    let host = host_with(None);
    let outcome = host.handle(
        "author",
        "save_scenario",
        &json!({
            "nodes": [{"id": "temp-1", "content": "Solo"}],
            "display_name": "Solo run"
        }),
    );
    assert_eq!(outcome["success"], true);
    assert_eq!(host.scenario().settings.display_name, "Solo run");
    let view = host.handle("ada", "get_current_state", &json!({}));
    assert_eq!(view["completed"], true);
}
