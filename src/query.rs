//! Visible subset of the task list for the current search and filter

use crate::counts::StatusCounts;
use crate::task::{Task, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    pub fn matches(self, status: TaskStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    /// All -> To Do -> In Progress -> Done -> All
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Only(TaskStatus::ToDo),
            StatusFilter::Only(TaskStatus::Done) => StatusFilter::All,
            StatusFilter::Only(status) => StatusFilter::Only(status.next()),
        }
    }

    /// Option label, e.g. `In Progress (2)`. `All` carries no count.
    pub fn label(self, counts: &StatusCounts) -> String {
        match self {
            StatusFilter::All => "All".to_string(),
            StatusFilter::Only(status) => format!("{} ({})", status.label(), counts.get(status)),
        }
    }
}

fn matches_search(task: &Task, needle: &str) -> bool {
    needle.is_empty()
        || task.title.to_lowercase().contains(needle)
        || task.description.to_lowercase().contains(needle)
}

pub fn filtered_tasks<'a>(tasks: &'a [Task], search_term: &str, filter: StatusFilter) -> Vec<&'a Task> {
    let needle = search_term.to_lowercase();
    tasks
        .iter()
        .filter(|t| matches_search(t, &needle) && filter.matches(t.status))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn task(id: u32, title: &str, description: &str, status: TaskStatus) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: description.to_string(),
            status,
        }
    }

    #[test]
    fn test_search_matches_either_field_case_insensitively() {
        let tasks = vec![
            task(1, "Buy milk", "", TaskStatus::ToDo),
            task(2, "Clean", "tidy yard", TaskStatus::Done),
        ];

        let ids: Vec<_> = filtered_tasks(&tasks, "y", StatusFilter::All).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let ids: Vec<_> = filtered_tasks(&tasks, "YARD", StatusFilter::All).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let tasks = vec![task(1, "a", "", TaskStatus::ToDo), task(2, "b", "", TaskStatus::Done)];
        assert_eq!(filtered_tasks(&tasks, "", StatusFilter::All).len(), 2);
    }

    #[test]
    fn test_status_filter_and_search_combine() {
        let tasks = vec![
            task(1, "write docs", "", TaskStatus::Done),
            task(2, "write tests", "", TaskStatus::InProgress),
            task(3, "release", "write notes", TaskStatus::InProgress),
        ];

        let visible = filtered_tasks(&tasks, "write", StatusFilter::Only(TaskStatus::InProgress));
        let ids: Vec<_> = visible.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3]);

        assert!(filtered_tasks(&tasks, "release", StatusFilter::Only(TaskStatus::ToDo)).is_empty());
    }

    #[test]
    fn test_filter_cycle_and_labels() {
        let tasks = vec![
            task(1, "a", "", TaskStatus::ToDo),
            task(2, "b", "", TaskStatus::InProgress),
            task(3, "c", "", TaskStatus::InProgress),
        ];
        let counts = StatusCounts::from_tasks(&tasks);

        let mut filter = StatusFilter::All;
        let mut labels = Vec::new();
        for _ in 0..4 {
            labels.push(filter.label(&counts));
            filter = filter.next();
        }

        assert_eq!(labels, vec!["All", "To Do (1)", "In Progress (2)", "Done (0)"]);
        assert_eq!(filter, StatusFilter::All);
    }

    fn arb_status() -> impl Strategy<Value = TaskStatus> {
        prop_oneof![Just(TaskStatus::ToDo), Just(TaskStatus::InProgress), Just(TaskStatus::Done)]
    }

    fn arb_filter() -> impl Strategy<Value = StatusFilter> {
        prop_oneof![Just(StatusFilter::All), arb_status().prop_map(StatusFilter::Only)]
    }

    fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
        proptest::collection::vec(("[a-cA-C ]{0,6}", "[a-cA-C ]{0,6}", arb_status()), 0..12).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (title, description, status))| Task {
                    id: i as u32 + 1,
                    title,
                    description,
                    status,
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_result_is_exactly_the_matching_subsequence(
            tasks in arb_tasks(),
            search in "[a-cA-C]{0,2}",
            filter in arb_filter(),
        ) {
            let visible = filtered_tasks(&tasks, &search, filter);
            let needle = search.to_lowercase();
            let expected: Vec<&Task> = tasks
                .iter()
                .filter(|t| {
                    (t.title.to_lowercase().contains(&needle) || t.description.to_lowercase().contains(&needle))
                        && filter.matches(t.status)
                })
                .collect();

            prop_assert_eq!(visible, expected);
        }
    }
}
