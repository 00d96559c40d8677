//! Error types for the task list

use thiserror::Error;

use crate::task::TaskId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error("No task ids left")]
    IdsExhausted,
}

/// Errors from the one-shot seed fetch
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),

    #[error("Malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown status: '{0}'")]
pub struct StatusParseError(pub String);
