use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorErrorCode {
    UnknownObject,
    MissingRoom,
    InvalidRoomReference,
    MissingOwningRoom,
    DuplicateSpawnIndex,
    NonConsecutiveSpawnIndices,
    SpawnListMismatch,
}

/// Configuration error raised while building a table from the scene graph.
#[derive(Debug, Clone)]
pub struct ActorExportError {
    pub code: ActorErrorCode,
    pub message: String,
    pub object_name: Option<String>,
}

impl ActorExportError {
    pub(crate) fn new(code: ActorErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            object_name: None,
        }
    }

    pub(crate) fn at_object(code: ActorErrorCode, message: String, object_name: &str) -> Self {
        Self {
            code,
            message,
            object_name: Some(object_name.to_string()),
        }
    }
}

impl fmt::Display for ActorExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.object_name {
            Some(name) => write!(f, "{:?}: {} (object={})", self.code, self.message, name),
            None => write!(f, "{:?}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for ActorExportError {}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableParseError {
    #[error("no array definition found in source")]
    MissingArrayBody,
    #[error("unbalanced braces in table data at offset {offset}")]
    UnbalancedBraces { offset: usize },
    #[error("unexpected text '{text}' between table rows")]
    StrayText { text: String },
    #[error("row {row}: expected {expected} fields, found {found} in '{text}'")]
    FieldCount {
        row: usize,
        expected: usize,
        found: usize,
        text: String,
    },
    #[error("row {row}: {field} '{value}' is not an integer")]
    InvalidInteger {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("row {row}: rotation '{value}' could not be evaluated")]
    InvalidRotation { row: usize, value: String },
}
