use crate::app::{App, Column, FormField, Mode};
use crate::notice::NoticeLevel;
use crate::query::StatusFilter;
use crate::task::{Task, TaskStatus};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        app.tick();
        terminal.draw(|f| render(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn boxed(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(focus_style(focused))
}

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    let header = Paragraph::new("Task List Manager")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD));
    f.render_widget(header, chunks[0]);

    render_search(f, app, chunks[1]);
    render_form(f, app, chunks[2]);
    render_filter(f, app, chunks[3]);
    render_grid(f, app, chunks[4]);
    render_status_line(f, app, chunks[5]);
}

fn render_search(f: &mut Frame, app: &App, area: Rect) {
    let focused = *app.mode() == Mode::Search;
    let text = if app.search().is_empty() && !focused {
        Span::styled("Search by Title or Description", Style::default().fg(Color::DarkGray))
    } else if focused {
        Span::raw(format!("{}_", app.search()))
    } else {
        Span::raw(app.search())
    };
    f.render_widget(Paragraph::new(text).block(boxed("Search Task Here", focused)), area);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let focused = match app.mode() {
        Mode::Form(field) => Some(*field),
        _ => None,
    };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage(35),
            Constraint::Percentage(45),
            Constraint::Percentage(20),
        ])
        .split(area);

    let draft = app.draft();
    let text_field = |value: &str, field: FormField, placeholder: &'static str| {
        if focused == Some(field) {
            Span::raw(format!("{value}_"))
        } else if value.is_empty() {
            Span::styled(placeholder, Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(value.to_string())
        }
    };

    f.render_widget(
        Paragraph::new(text_field(draft.title.as_str(), FormField::Title, "Title"))
            .block(boxed("Add Task: Title", focused == Some(FormField::Title))),
        cols[0],
    );
    f.render_widget(
        Paragraph::new(text_field(draft.description.as_str(), FormField::Description, "Description"))
            .block(boxed("Description", focused == Some(FormField::Description))),
        cols[1],
    );
    f.render_widget(
        Paragraph::new(format!("< {} >", draft.status))
            .block(boxed("Status", focused == Some(FormField::Status))),
        cols[2],
    );
}

fn render_filter(f: &mut Frame, app: &App, area: Rect) {
    let counts = app.counts();
    let options = std::iter::once(StatusFilter::All).chain(TaskStatus::ALL.into_iter().map(StatusFilter::Only));
    let mut spans = Vec::new();
    for option in options {
        let style = if option == app.filter() {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!(" {} ", option.label(&counts)), style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).block(boxed("Filter Tasks", false)), area);
}

fn cell_text(task: &Task, column: Column) -> String {
    match column {
        Column::Title => task.title.clone(),
        Column::Description => task.description.clone(),
        Column::Status => task.status.to_string(),
    }
}

fn render_grid(f: &mut Frame, app: &App, area: Rect) {
    let block = boxed("Tasks", false);
    let tasks = app.visible_tasks();
    if tasks.is_empty() {
        let placeholder = if app.is_loading() {
            "Loading tasks..."
        } else {
            "No tasks available"
        };
        let body = Paragraph::new(placeholder)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(body, area);
        return;
    }

    let editing = match app.mode() {
        Mode::Edit(edit) => Some(edit),
        _ => None,
    };
    let rows: Vec<Row> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let mut cells = vec![Cell::from(task.id.to_string())];
            for column in Column::ALL {
                let cell = match editing {
                    Some(edit) if edit.id == task.id && edit.column == column => {
                        Cell::from(format!("{}_", edit.buffer)).style(Style::default().fg(Color::Yellow))
                    }
                    _ if i == app.selected_row() && column == app.selected_column() => {
                        Cell::from(cell_text(task, column)).style(Style::default().add_modifier(Modifier::REVERSED))
                    }
                    _ => Cell::from(cell_text(task, column)),
                };
                cells.push(cell);
            }
            Row::new(cells)
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Percentage(35),
        Constraint::Percentage(45),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .header(
            Row::new(["Task ID", "Title", "Description", "Status"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD));

    let mut state = TableState::default();
    state.select(Some(app.selected_row()));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_status_line(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    if let Some(notice) = app.store().notice() {
        let color = match notice.level {
            NoticeLevel::Warning => Color::Yellow,
            NoticeLevel::Success => Color::Green,
        };
        spans.push(Span::styled(
            format!("[{}] {}", notice.at.format("%H:%M:%S"), notice.message),
            Style::default().fg(color),
        ));
        spans.push(Span::raw("  "));
    }
    let help = match app.mode() {
        Mode::Normal => "q quit  / search  a add  f filter  enter edit  d delete",
        Mode::Search => "enter/esc done",
        Mode::Form(_) => "tab next field  enter add  esc close",
        Mode::Edit(_) => "enter save  esc cancel",
    };
    spans.push(Span::styled(help, Style::default().fg(Color::DarkGray)));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedHandle;
    use crate::task::Draft;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    fn buffer_text(buffer: &Buffer) -> String {
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_empty_grid_placeholder() {
        let app = App::new(SeedHandle::disabled());
        let screen = draw(&app);

        assert!(screen.contains("Task List Manager"));
        assert!(screen.contains("No tasks available"));
        assert!(screen.contains("Search by Title or Description"));
        assert!(screen.contains("To Do (0)"));
    }

    #[test]
    fn test_grid_rows_and_counts() {
        let mut app = App::new(SeedHandle::disabled());
        app.store_mut()
            .add(&mut Draft::new("Water plants", "balcony", TaskStatus::InProgress))
            .unwrap();

        let screen = draw(&app);

        assert!(screen.contains("Water plants"));
        assert!(screen.contains("balcony"));
        assert!(screen.contains("In Progress (1)"));
        assert!(screen.contains("Task added Successfully!"));
        assert!(!screen.contains("No tasks available"));
    }
}
