use super::*;
use serde_json::json;

fn draft(value: serde_json::Value) -> ScenarioDraft {
    serde_json::from_value(value).expect("draft should decode")
}

fn previous() -> Scenario {
    empty_scenario(Settings::default())
}

#[test]
fn build_scenario_creates_start_node_and_settings() {
    let scenario = build_scenario(
        &draft(json!({
            "nodes": [
                {
                    "id": "temp-1",
                    "content": "First node",
                    "media": {"type": "image", "url": "http://img"},
                    "choices": [{"text": "Go to 2", "target_node_id": "temp-2"}],
                    "transcript_url": ""
                },
                {
                    "id": "temp-2",
                    "content": "Second node",
                    "media": {"type": "", "url": ""},
                    "choices": [],
                    "transcript_url": "http://example.com/t.vtt"
                }
            ],
            "enable_undo": true,
            "enable_scoring": true,
            "max_score": 77
        })),
        &previous(),
        &AuthoringLimits::default(),
    )
    .expect("save should pass");

    let nodes = scenario.nodes.values().collect::<Vec<_>>();
    assert_eq!(scenario.start_node_id, nodes[0].id);
    assert_eq!(nodes[0].choices[0].target_node_id, nodes[1].id);
    assert_eq!(
        nodes[1].transcript_url.as_deref(),
        Some("http://example.com/t.vtt")
    );
    assert_eq!(nodes[0].transcript_url, None);
    assert!(scenario.settings.enable_undo);
    assert!(scenario.settings.enable_scoring);
    assert_eq!(scenario.settings.max_score, 77.0);
    assert_eq!(scenario.revision, 1);
}

#[test]
fn build_scenario_rejects_dangling_target() {
    let errors = build_scenario(
        &draft(json!({
            "nodes": [{
                "id": "temp-1",
                "content": "Only node",
                "choices": [{"text": "Nowhere", "target_node_id": "does-not-exist"}]
            }]
        })),
        &previous(),
        &AuthoringLimits::default(),
    )
    .expect_err("dangling target should fail");

    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("Invalid target does-not-exist"));
}

#[test]
fn build_scenario_rejects_more_than_thirty_nodes() {
    let nodes = (0..31)
        .map(|index| json!({"id": format!("n{}", index), "content": "x"}))
        .collect::<Vec<_>>();
    let errors = build_scenario(
        &draft(json!({ "nodes": nodes })),
        &previous(),
        &AuthoringLimits::default(),
    )
    .expect_err("too many nodes");
    assert_eq!(errors[0].code(), "AUTHORING_TOO_MANY_NODES");
}

#[test]
fn build_scenario_rejects_empty_draft() {
    let empty = draft(json!({"nodes": []}));
    let errors = build_scenario(&empty, &previous(), &AuthoringLimits::default())
        .expect_err("empty");
    assert_eq!(errors[0].code(), "AUTHORING_MISSING_START_NODE");
    assert_eq!(errors[0].message, "At least one node is required");
}

#[test]
fn validator_fields_point_at_draft_positions() {
    let errors = build_scenario(
        &draft(json!({
            "nodes": [
                {"id": "blank"},
                {"id": "a", "content": "A", "choices": [
                    {"text": "ok", "target_node_id": "a"},
                    {"text": "bad", "target_node_id": "ghost"}
                ]}
            ]
        })),
        &previous(),
        &AuthoringLimits::default(),
    )
    .expect_err("dangling");
    assert_eq!(
        errors[0].field.as_deref(),
        Some("nodes[1].choices[1].target_node_id")
    );
}

#[test]
fn duplicate_permanent_ids_are_rejected() {
    let errors = build_scenario(
        &draft(json!({
            "nodes": [
                {"id": "same", "content": "A"},
                {"id": "same", "content": "B"}
            ]
        })),
        &previous(),
        &AuthoringLimits::default(),
    )
    .expect_err("duplicate");
    assert_eq!(errors[0].code(), "AUTHORING_DUPLICATE_ID");
}

#[test]
fn save_outcome_groups_messages_by_field() {
    let errors = vec![
        ScenarioError::validation(
            bs_core::ValidationKind::InvalidScore,
            "score a",
            "nodes[0].choices[0].score",
        ),
        ScenarioError::validation(
            bs_core::ValidationKind::InvalidScore,
            "score b",
            "nodes[0].choices[0].score",
        ),
        ScenarioError::new(bs_core::ErrorKind::MalformedInput, "bad payload"),
    ];
    let outcome = SaveOutcome::rejected(&errors);
    assert!(!outcome.success);
    assert_eq!(outcome.errors, vec!["score a", "score b", "bad payload"]);
    assert_eq!(outcome.field_errors["nodes[0].choices[0].score"].len(), 2);
    assert_eq!(outcome.field_errors["nodes"], vec!["bad payload"]);
    assert!(SaveOutcome::saved().success);
}
