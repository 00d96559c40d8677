use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StatusParseError;

pub type TaskId = u32;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    /// Next value in select-editor order, wrapping from `Done` back to `ToDo`.
    pub fn next(self) -> Self {
        match self {
            TaskStatus::ToDo => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::ToDo,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            TaskStatus::ToDo => TaskStatus::Done,
            TaskStatus::InProgress => TaskStatus::ToDo,
            TaskStatus::Done => TaskStatus::InProgress,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StatusParseError(s.to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

/// Unsaved input for the add form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl Draft {
    pub fn new(title: impl Into<String>, description: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A single-field overwrite coming from the grid's inline editors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Title(String),
    Description(String),
    Status(TaskStatus),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");

        let status: TaskStatus = serde_json::from_str("\"To Do\"").unwrap();
        assert_eq!(status, TaskStatus::ToDo);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Done".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert_eq!(" in progress ".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert!("Blocked".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_status_cycle_visits_every_value() {
        let mut status = TaskStatus::ToDo;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(status);
            status = status.next();
        }
        assert_eq!(seen, TaskStatus::ALL);
        assert_eq!(status, TaskStatus::ToDo);
        assert_eq!(TaskStatus::ToDo.prev(), TaskStatus::Done);
    }

    #[test]
    fn test_draft_reset() {
        let mut draft = Draft::new("Title", "Body", TaskStatus::Done);
        draft.reset();
        assert_eq!(draft, Draft::default());
        assert_eq!(draft.status, TaskStatus::ToDo);
        assert!(draft.title.is_empty());
    }
}
