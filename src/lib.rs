//! Terminal task list manager
//!
//! A single in-memory task list seeded once from a placeholder REST endpoint,
//! with local add, delete, inline edit, search and status filtering.

pub mod app;
pub mod config;
pub mod counts;
pub mod error;
pub mod notice;
pub mod query;
pub mod seed;
pub mod store;
pub mod task;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use counts::StatusCounts;
pub use error::{SeedError, StoreError};
pub use query::{filtered_tasks, StatusFilter};
pub use seed::{SeedHandle, SeedLoader};
pub use store::TaskStore;
pub use task::{Draft, FieldEdit, Task, TaskId, TaskStatus};
