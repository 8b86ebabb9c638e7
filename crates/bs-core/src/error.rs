use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
    EmptyId,
    DuplicateId,
    DanglingTarget,
    MissingStartNode,
    TooManyNodes,
    InvalidScore,
    MissingAltText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    InvalidChoice,
    UndoUnavailable,
    ResetUnavailable,
    Validation(ValidationKind),
    MalformedInput,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "GRAPH_NOT_FOUND",
            Self::InvalidChoice => "ENGINE_INVALID_CHOICE",
            Self::UndoUnavailable => "ENGINE_UNDO_UNAVAILABLE",
            Self::ResetUnavailable => "ENGINE_RESET_UNAVAILABLE",
            Self::MalformedInput => "HOST_MALFORMED_INPUT",
            Self::Validation(kind) => match kind {
                ValidationKind::EmptyId => "AUTHORING_EMPTY_ID",
                ValidationKind::DuplicateId => "AUTHORING_DUPLICATE_ID",
                ValidationKind::DanglingTarget => "AUTHORING_DANGLING_TARGET",
                ValidationKind::MissingStartNode => "AUTHORING_MISSING_START_NODE",
                ValidationKind::TooManyNodes => "AUTHORING_TOO_MANY_NODES",
                ValidationKind::InvalidScore => "AUTHORING_INVALID_SCORE",
                ValidationKind::MissingAltText => "AUTHORING_MISSING_ALT_TEXT",
            },
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}: {}", .kind.code(), .message)]
pub struct ScenarioError {
    pub kind: ErrorKind,
    pub message: String,
    /// Authoring field path, e.g. `nodes[2].choices[0].target_node_id`.
    pub field: Option<String>,
}

impl ScenarioError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(
        kind: ErrorKind,
        message: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn validation(
        kind: ValidationKind,
        message: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self::with_field(ErrorKind::Validation(kind), message, field)
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}
