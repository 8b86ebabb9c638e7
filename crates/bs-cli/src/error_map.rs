use std::fmt::Display;

use bs_core::ScenarioError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct CliError {
    pub code: String,
    pub message: String,
}

impl CliError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<ScenarioError> for CliError {
    fn from(error: ScenarioError) -> Self {
        Self::new(error.code(), error.message)
    }
}

fn map_error(code: &'static str, error: impl Display) -> CliError {
    CliError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: CliError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    println!(
        "ERROR_MSG_JSON:{}",
        serde_json::Value::String(error.message)
    );
    1
}

pub(crate) fn map_cli_scenario_read(error: std::io::Error) -> CliError {
    map_error("CLI_SCENARIO_READ", error)
}

pub(crate) fn map_cli_scenario_write(error: std::io::Error) -> CliError {
    map_error("CLI_SCENARIO_WRITE", error)
}

pub(crate) fn map_cli_scenario_invalid(error: serde_json::Error) -> CliError {
    map_error("CLI_SCENARIO_INVALID", error)
}

pub(crate) fn map_cli_draft_read(error: std::io::Error) -> CliError {
    map_error("CLI_DRAFT_READ", error)
}

pub(crate) fn map_cli_draft_invalid(error: serde_json::Error) -> CliError {
    map_error("CLI_DRAFT_INVALID", error)
}

pub(crate) fn map_cli_state_write(error: std::io::Error) -> CliError {
    map_error("CLI_STATE_WRITE", error)
}

pub(crate) fn map_cli_state_read(error: std::io::Error) -> CliError {
    map_error("CLI_STATE_READ", error)
}

pub(crate) fn map_cli_state_invalid(error: serde_json::Error) -> CliError {
    map_error("CLI_STATE_INVALID", error)
}

pub(crate) fn map_cli_serialize(error: serde_json::Error) -> CliError {
    map_error("CLI_SERIALIZE", error)
}
