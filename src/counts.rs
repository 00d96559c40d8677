use crate::task::{Task, TaskStatus};

/// Per-status totals over the full, unfiltered collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub to_do: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl StatusCounts {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut counts, task| {
            *counts.slot(task.status) += 1;
            counts
        })
    }

    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::ToDo => self.to_do,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Done => self.done,
        }
    }

    pub fn total(&self) -> usize {
        self.to_do + self.in_progress + self.done
    }

    fn slot(&mut self, status: TaskStatus) -> &mut usize {
        match status {
            TaskStatus::ToDo => &mut self.to_do,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }
}
