//! Fire-and-forget feedback shown in the status line

use chrono::{DateTime, Local};

pub const MISSING_FIELDS: &str = "Please provide Title and Description.";
pub const TASK_ADDED: &str = "Task added Successfully!";
pub const TASK_DELETED: &str = "Task deleted Successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Local>,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
            at: Local::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            at: Local::now(),
        }
    }
}
