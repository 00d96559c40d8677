use crate::error::StoreError;
use crate::notice::{self, Notice};
use crate::task::{Draft, FieldEdit, Task, TaskId};
use tracing::debug;

/// Ordered, in-memory task collection. Insertion order is display order.
///
/// Also owns the pending add-form draft.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    draft: Draft,
    /// `None` once the counter has passed `TaskId::MAX`.
    next_id: Option<TaskId>,
    notice: Option<Notice>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            draft: Draft::default(),
            next_id: Some(1),
            notice: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Most recent notice; a newer one replaces it.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Replace the whole collection. Input is trusted as-is.
    pub fn load(&mut self, tasks: Vec<Task>) {
        self.next_id = tasks.iter().map(|t| t.id).max().map_or(Some(1), |max| max.checked_add(1));
        debug!(count = tasks.len(), next_id = ?self.next_id, "load: replaced collection");
        self.tasks = tasks;
    }

    /// Append the draft as a new task and reset it.
    ///
    /// An empty title or description rejects the draft untouched and leaves a
    /// warning notice.
    pub fn add(&mut self, draft: &mut Draft) -> Result<TaskId, StoreError> {
        let missing = if draft.title.is_empty() {
            Some("title")
        } else if draft.description.is_empty() {
            Some("description")
        } else {
            None
        };
        if let Some(field) = missing {
            debug!(field, "add: rejected draft");
            self.notice = Some(Notice::warning(notice::MISSING_FIELDS));
            return Err(StoreError::MissingField(field));
        }

        let id = self.allocate_id()?;
        let draft = std::mem::take(draft);
        self.tasks.push(Task {
            id,
            title: draft.title,
            description: draft.description,
            status: draft.status,
        });
        debug!(id, "add: appended task");
        self.notice = Some(Notice::success(notice::TASK_ADDED));
        Ok(id)
    }

    /// Add the store's own draft; see [`TaskStore::add`].
    pub fn submit_draft(&mut self) -> Result<TaskId, StoreError> {
        let mut draft = std::mem::take(&mut self.draft);
        let result = self.add(&mut draft);
        self.draft = draft;
        result
    }

    /// Next counter value, or the lowest free id once the counter is spent.
    fn allocate_id(&mut self) -> Result<TaskId, StoreError> {
        let id = match self.next_id {
            Some(id) => id,
            None => (1..=TaskId::MAX)
                .find(|id| self.get(*id).is_none())
                .ok_or(StoreError::IdsExhausted)?,
        };
        self.next_id = id.checked_add(1);
        if self.next_id.is_some_and(|next| self.get(next).is_some()) {
            self.next_id = None;
        }
        Ok(id)
    }

    /// Remove by id. Reports success even when nothing matched; the return
    /// value says whether an entry was actually dropped.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        debug!(id, removed, "remove");
        self.notice = Some(Notice::success(notice::TASK_DELETED));
        removed
    }

    pub fn update_field(&mut self, id: TaskId, edit: FieldEdit) -> Result<(), StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        debug!(id, ?edit, "update_field");
        match edit {
            FieldEdit::Title(title) => task.title = title,
            FieldEdit::Description(description) => task.description = description,
            FieldEdit::Status(status) => task.status = status,
        }
        Ok(())
    }
}
