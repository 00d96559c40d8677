//! View state and keyboard handling
//!
//! `App` owns the store (which holds the add-form draft) plus everything the
//! grid needs around it: search text, status filter, selection and the
//! current input mode.
//! It does no rendering; the ui module reads it through accessors.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::counts::StatusCounts;
use crate::query::{filtered_tasks, StatusFilter};
use crate::seed::SeedHandle;
use crate::store::TaskStore;
use crate::task::{Draft, FieldEdit, Task, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Status,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Status,
            FormField::Status => FormField::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Status,
            FormField::Description => FormField::Title,
            FormField::Status => FormField::Description,
        }
    }
}

/// Editable grid columns. The id column is read-only and never selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Title,
    Description,
    Status,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Title, Column::Description, Column::Status];

    fn right(self) -> Self {
        match self {
            Column::Title => Column::Description,
            _ => Column::Status,
        }
    }

    fn left(self) -> Self {
        match self {
            Column::Status => Column::Description,
            _ => Column::Title,
        }
    }
}

/// In-progress inline text edit of one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub id: TaskId,
    pub column: Column,
    pub buffer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search,
    Form(FormField),
    Edit(CellEdit),
}

#[derive(Debug)]
pub struct App {
    store: TaskStore,
    search: String,
    filter: StatusFilter,
    selected_row: usize,
    selected_column: Column,
    mode: Mode,
    seed: SeedHandle,
}

impl App {
    pub fn new(seed: SeedHandle) -> Self {
        Self {
            store: TaskStore::new(),
            search: String::new(),
            filter: StatusFilter::All,
            selected_row: 0,
            selected_column: Column::Title,
            mode: Mode::Normal,
            seed,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskStore {
        &mut self.store
    }

    pub fn draft(&self) -> &Draft {
        self.store.draft()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    pub fn selected_column(&self) -> Column {
        self.selected_column
    }

    pub fn is_loading(&self) -> bool {
        self.seed.is_pending()
    }

    /// Recomputed on every call from the current store, search and filter.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        filtered_tasks(self.store.tasks(), &self.search, self.filter)
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts::from_tasks(self.store.tasks())
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.selected_row).copied()
    }

    /// Pick up the seed result if it has arrived.
    pub fn tick(&mut self) {
        if let Some(tasks) = self.seed.poll() {
            self.store.load(tasks);
            self.clamp_selection();
        }
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match self.mode.clone() {
            Mode::Normal => return self.handle_normal_key(key),
            Mode::Search => self.handle_search_key(key),
            Mode::Form(field) => self.handle_form_key(field, key),
            Mode::Edit(edit) => self.handle_edit_key(edit, key),
        }
        false
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('/') => self.mode = Mode::Search,
            KeyCode::Char('a') => self.mode = Mode::Form(FormField::Title),
            KeyCode::Char('f') | KeyCode::Tab => {
                self.filter = self.filter.next();
                self.clamp_selection();
            }
            KeyCode::Up | KeyCode::Char('k') => self.selected_row = self.selected_row.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_row += 1;
                self.clamp_selection();
            }
            KeyCode::Left | KeyCode::Char('h') => self.selected_column = self.selected_column.left(),
            KeyCode::Right | KeyCode::Char('l') => self.selected_column = self.selected_column.right(),
            KeyCode::Enter | KeyCode::Char('e') => self.begin_cell_edit(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            _ => {}
        }
        false
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Backspace => {
                self.search.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => self.search.push(c),
            _ => return,
        }
        self.clamp_selection();
    }

    fn handle_form_key(&mut self, field: FormField, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => self.submit_draft(),
            KeyCode::Tab | KeyCode::Down => self.mode = Mode::Form(field.next()),
            KeyCode::BackTab | KeyCode::Up => self.mode = Mode::Form(field.prev()),
            code => {
                let draft = self.store.draft_mut();
                match field {
                    FormField::Status => match code {
                        KeyCode::Right | KeyCode::Char(' ') => draft.status = draft.status.next(),
                        KeyCode::Left => draft.status = draft.status.prev(),
                        _ => {}
                    },
                    FormField::Title => edit_text(&mut draft.title, key),
                    FormField::Description => edit_text(&mut draft.description, key),
                }
            }
        }
    }

    fn handle_edit_key(&mut self, mut edit: CellEdit, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => {
                let change = match edit.column {
                    Column::Description => FieldEdit::Description(edit.buffer),
                    _ => FieldEdit::Title(edit.buffer),
                };
                // The row can only disappear if a seed load replaced the store mid-edit.
                if let Err(e) = self.store.update_field(edit.id, change) {
                    debug!("handle_edit_key: dropped edit: {}", e);
                }
                self.mode = Mode::Normal;
                self.clamp_selection();
            }
            _ => {
                edit_text(&mut edit.buffer, key);
                self.mode = Mode::Edit(edit);
            }
        }
    }

    fn submit_draft(&mut self) {
        if self.store.submit_draft().is_ok() {
            self.mode = Mode::Normal;
            self.clamp_selection();
        }
    }

    fn begin_cell_edit(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let id = task.id;
        match self.selected_column {
            Column::Status => {
                let status = task.status.next();
                if let Err(e) = self.store.update_field(id, FieldEdit::Status(status)) {
                    debug!("begin_cell_edit: {}", e);
                }
                self.clamp_selection();
            }
            column => {
                let buffer = match column {
                    Column::Description => task.description.clone(),
                    _ => task.title.clone(),
                };
                self.mode = Mode::Edit(CellEdit { id, column, buffer });
            }
        }
    }

    fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id) {
            self.store.remove(id);
            self.clamp_selection();
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        self.selected_row = self.selected_row.min(len.saturating_sub(1));
    }
}

fn edit_text(buffer: &mut String, key: KeyEvent) {
    match key.code {
        KeyCode::Backspace => {
            buffer.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => buffer.push(c),
        _ => {}
    }
}
