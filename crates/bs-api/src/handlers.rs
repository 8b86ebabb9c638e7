use bs_authoring::{SaveOutcome, ScenarioDraft};
use bs_core::{ErrorKind, ScenarioError, ViewState};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::host::ScenarioHost;

pub const HANDLER_NAMES: &[&str] = &[
    "get_current_state",
    "select_choice",
    "undo_choice",
    "reset_activity",
    "save_scenario",
];

#[derive(Debug, Deserialize)]
struct SelectChoicePayload {
    choice_index: i64,
}

impl SelectChoicePayload {
    /// Any integer decodes; an index no node can have is an invalid choice.
    fn index(&self) -> Result<usize, ScenarioError> {
        usize::try_from(self.choice_index).map_err(|_| {
            ScenarioError::new(
                ErrorKind::InvalidChoice,
                format!("Invalid choice index {}.", self.choice_index),
            )
        })
    }
}

fn malformed(message: impl Into<String>) -> ScenarioError {
    ScenarioError::new(ErrorKind::MalformedInput, message)
}

fn decode<T: DeserializeOwned>(handler: &str, payload: &Value) -> Result<T, ScenarioError> {
    T::deserialize(payload)
        .map_err(|error| malformed(format!("Invalid payload for {}: {}", handler, error)))
}

pub fn success_json(view: &ViewState) -> Value {
    let mut object = match serde_json::to_value(view) {
        Ok(Value::Object(object)) => object,
        _ => Map::new(),
    };
    object.insert("success".to_string(), Value::Bool(true));
    Value::Object(object)
}

pub fn failure_json(error: &ScenarioError) -> Value {
    json!({
        "success": false,
        "error": error.message,
        "code": error.code(),
    })
}

pub fn outcome_json(outcome: &SaveOutcome) -> Value {
    serde_json::to_value(outcome).unwrap_or_else(|_| json!({ "success": outcome.success }))
}

impl ScenarioHost {
    /// JSON entry point: `handler` names one of [`HANDLER_NAMES`].
    pub fn handle(&self, learner_id: &str, handler: &str, payload: &Value) -> Value {
        if handler == "save_scenario" {
            return match decode::<ScenarioDraft>(handler, payload) {
                Ok(draft) => outcome_json(&self.save_scenario(&draft)),
                Err(error) => outcome_json(&SaveOutcome::rejected(&[error])),
            };
        }

        let result = match handler {
            "get_current_state" => self.get_current_state(learner_id),
            "select_choice" => decode::<SelectChoicePayload>(handler, payload)
                .and_then(|payload| payload.index())
                .and_then(|index| self.select_choice(learner_id, index)),
            "undo_choice" => self.undo_choice(learner_id),
            "reset_activity" => self.reset_activity(learner_id),
            other => Err(malformed(format!("Unknown handler \"{}\".", other))),
        };

        match result {
            Ok(view) => success_json(&view),
            Err(error) => {
                tracing::debug!(
                    learner = %learner_id,
                    handler,
                    code = error.code(),
                    "handler failed"
                );
                failure_json(&error)
            }
        }
    }
}
