use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::model::board::column_for;
use crate::model::config::AppConfig;
use crate::model::task::{Task, TaskDraft, TaskPatch, TaskPriority, TaskStatus};
use crate::ops::board::{BoardQuery, PriorityFilter, SortKey, derive};
use crate::ops::validate::{self, ValidationError};
use crate::storage::kv::FileKv;
use crate::storage::{self, STORE_FILE, config_io, prefs};
use crate::store::TaskStore;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
    Form,
    Confirm,
    Drag,
}

/// Which form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Status,
    Priority,
    DueDate,
}

impl FormField {
    pub const ORDER: [FormField; 5] = [
        FormField::Title,
        FormField::Description,
        FormField::Status,
        FormField::Priority,
        FormField::DueDate,
    ];

    pub fn next(self) -> FormField {
        let idx = FormField::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        FormField::ORDER[(idx + 1) % FormField::ORDER.len()]
    }

    pub fn prev(self) -> FormField {
        let idx = FormField::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        FormField::ORDER[(idx + FormField::ORDER.len() - 1) % FormField::ORDER.len()]
    }
}

/// State of the create/edit form modal
#[derive(Debug, Clone)]
pub struct FormState {
    /// Id of the task being edited; None while creating
    pub editing: Option<String>,
    pub focus: FormField,
    pub title: String,
    pub title_cursor: usize,
    pub description: String,
    pub description_cursor: usize,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Due date as typed (`YYYY-MM-DD` or blank)
    pub due_date: String,
    pub due_date_cursor: usize,
    pub error: Option<ValidationError>,
}

impl FormState {
    /// A blank create form. New tasks default to TODO / MEDIUM.
    pub fn create() -> FormState {
        FormState {
            editing: None,
            focus: FormField::Title,
            title: String::new(),
            title_cursor: 0,
            description: String::new(),
            description_cursor: 0,
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: String::new(),
            due_date_cursor: 0,
            error: None,
        }
    }

    /// An edit form pre-filled from the task.
    pub fn edit(task: &Task) -> FormState {
        let title = task.title.clone();
        let description = task.description.clone().unwrap_or_default();
        let due_date = task
            .due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        FormState {
            editing: Some(task.id.clone()),
            focus: FormField::Title,
            title_cursor: title.len(),
            title,
            description_cursor: description.len(),
            description,
            status: task.status,
            priority: task.priority,
            due_date_cursor: due_date.len(),
            due_date,
            error: None,
        }
    }

    /// The focused text buffer and its cursor, if the focused field is one.
    pub fn buffer_mut(&mut self) -> Option<(&mut String, &mut usize)> {
        match self.focus {
            FormField::Title => Some((&mut self.title, &mut self.title_cursor)),
            FormField::Description => Some((&mut self.description, &mut self.description_cursor)),
            FormField::DueDate => Some((&mut self.due_date, &mut self.due_date_cursor)),
            FormField::Status | FormField::Priority => None,
        }
    }
}

/// A pending two-phase delete
#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub task_id: String,
    pub title: String,
}

/// A card picked up and not yet dropped
#[derive(Debug, Clone)]
pub struct DragState {
    pub task_id: String,
    pub title: String,
    pub from: TaskStatus,
    /// Column currently under the card
    pub target: TaskStatus,
}

/// How a drag gesture resolved. The store only ever sees the
/// `DroppedOnColumn` arm, as a `change_status` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    DroppedOnColumn(TaskStatus),
    DroppedOutside,
    Cancelled,
}

/// Main application state
pub struct App {
    pub store: TaskStore<FileKv>,
    pub config: AppConfig,
    pub theme: Theme,
    pub data_dir: PathBuf,
    pub mode: Mode,
    pub should_quit: bool,
    pub show_help: bool,
    /// Live search term (edited in Search mode, applied continuously)
    pub search_input: String,
    pub sort_key: SortKey,
    pub priority_filter: PriorityFilter,
    /// Columns showing their full contents instead of the capped prefix
    pub expanded: HashSet<TaskStatus>,
    /// Cursor position on the board: column index and row within the
    /// column's visible cards
    pub cursor_col: usize,
    pub cursor_row: usize,
    pub form: Option<FormState>,
    pub confirm: Option<ConfirmState>,
    pub drag: Option<DragState>,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(store: TaskStore<FileKv>, config: AppConfig, data_dir: PathBuf) -> App {
        let theme = Theme::from_config(&config.ui);
        let sort_key = prefs::load_sort(store.kv());
        let priority_filter = prefs::load_filter(store.kv());

        App {
            store,
            theme,
            data_dir,
            mode: Mode::Navigate,
            should_quit: false,
            show_help: false,
            search_input: String::new(),
            sort_key,
            priority_filter,
            expanded: HashSet::new(),
            cursor_col: 0,
            cursor_row: 0,
            form: None,
            confirm: None,
            drag: None,
            status_message: None,
            config,
        }
    }

    /// The derivation inputs for the current UI state.
    pub fn board_query(&self) -> BoardQuery {
        BoardQuery {
            search: self.search_input.clone(),
            filter: self.priority_filter,
            sort: self.sort_key,
            expanded: self.expanded.clone(),
            column_limit: self.config.board.column_limit,
        }
    }

    /// Status of the column under the cursor.
    pub fn cursor_status(&self) -> TaskStatus {
        TaskStatus::ALL[self.cursor_col.min(TaskStatus::ALL.len() - 1)]
    }

    /// Number of visible cards in a column under the current query.
    pub fn visible_len(&self, status: TaskStatus) -> usize {
        let query = self.board_query();
        let view = derive(self.store.tasks(), &query);
        view[&status].visible.len()
    }

    /// Id of the card under the cursor, if any.
    pub fn selected_task_id(&self) -> Option<String> {
        let query = self.board_query();
        let view = derive(self.store.tasks(), &query);
        view[&self.cursor_status()]
            .visible
            .get(self.cursor_row)
            .map(|t| t.id.clone())
    }

    /// Keep the cursor row inside the visible card range.
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_len(self.cursor_status());
        if len == 0 {
            self.cursor_row = 0;
        } else {
            self.cursor_row = self.cursor_row.min(len - 1);
        }
    }

    // --- Preference-backed toggles ---

    /// Advance to the next sort key and persist the choice.
    pub fn cycle_sort(&mut self) {
        self.sort_key = self.sort_key.next();
        prefs::save_sort(self.store.kv_mut(), self.sort_key);
        self.status_message = Some(format!("sort: {}", self.sort_key.label()));
        self.clamp_cursor();
    }

    /// Advance to the next priority filter and persist the choice.
    pub fn cycle_filter(&mut self) {
        self.priority_filter = self.priority_filter.next();
        prefs::save_filter(self.store.kv_mut(), self.priority_filter);
        self.status_message = Some(format!("filter: {}", self.priority_filter.as_str()));
        self.clamp_cursor();
    }

    /// Toggle whether the cursor column shows past the cap.
    pub fn toggle_expand(&mut self) {
        let status = self.cursor_status();
        if !self.expanded.remove(&status) {
            self.expanded.insert(status);
        }
        self.clamp_cursor();
    }

    // --- Form lifecycle ---

    pub fn open_create_form(&mut self) {
        self.form = Some(FormState::create());
        self.mode = Mode::Form;
    }

    pub fn open_edit_form(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if let Some(task) = self.store.get_by_id(&id) {
            self.form = Some(FormState::edit(task));
            self.mode = Mode::Form;
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.mode = Mode::Navigate;
    }

    /// Validate the form and route it to `create` or `update`. On a
    /// validation error the form stays open with a field-level message and
    /// the store is not touched.
    pub fn submit_form(&mut self) {
        let (title, description, status, priority, due_raw, editing) = match &self.form {
            Some(form) => (
                form.title.trim().to_string(),
                form.description.trim().to_string(),
                form.status,
                form.priority,
                form.due_date.clone(),
                form.editing.clone(),
            ),
            None => return,
        };

        let due_date = match validate::parse_due_date(&due_raw) {
            Ok(d) => d,
            Err(e) => {
                if let Some(form) = &mut self.form {
                    form.error = Some(e);
                }
                return;
            }
        };

        let draft = TaskDraft {
            title,
            description: if description.is_empty() {
                None
            } else {
                Some(description)
            },
            status,
            priority,
            due_date,
        };

        if let Err(e) = validate::validate_draft(&draft, self.store.tasks(), editing.as_deref()) {
            if let Some(form) = &mut self.form {
                form.error = Some(e);
            }
            return;
        }

        match editing {
            Some(id) => {
                self.status_message = Some(format!("updated \"{}\"", draft.title));
                self.store.update(&id, TaskPatch::from_draft(draft));
            }
            None => {
                let task = self.store.create(draft);
                self.status_message = Some(format!("created \"{}\"", task.title));
            }
        }

        self.form = None;
        self.mode = Mode::Navigate;
        self.clamp_cursor();
    }

    // --- Two-phase delete ---

    pub fn request_delete(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if let Some(task) = self.store.get_by_id(&id) {
            self.confirm = Some(ConfirmState {
                task_id: task.id.clone(),
                title: task.title.clone(),
            });
            self.mode = Mode::Confirm;
        }
    }

    pub fn confirm_delete(&mut self) {
        let Some(confirm) = self.confirm.take() else {
            self.mode = Mode::Navigate;
            return;
        };
        self.store.delete(&confirm.task_id);
        self.status_message = Some(format!("deleted \"{}\"", confirm.title));
        self.mode = Mode::Navigate;
        self.clamp_cursor();
    }

    pub fn cancel_delete(&mut self) {
        self.confirm = None;
        self.mode = Mode::Navigate;
    }

    // --- Drag gesture ---

    /// Pick up the card under the cursor.
    pub fn grab_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if let Some(task) = self.store.get_by_id(&id) {
            self.drag = Some(DragState {
                task_id: task.id.clone(),
                title: task.title.clone(),
                from: task.status,
                target: task.status,
            });
            self.mode = Mode::Drag;
        }
    }

    /// Retarget the drag one column left or right.
    pub fn retarget_drag(&mut self, direction: i32) {
        let Some(drag) = &mut self.drag else {
            return;
        };
        let idx = TaskStatus::ALL
            .iter()
            .position(|s| *s == drag.target)
            .unwrap_or(0);
        let new_idx =
            (idx as i32 + direction).clamp(0, TaskStatus::ALL.len() as i32 - 1) as usize;
        drag.target = TaskStatus::ALL[new_idx];
    }

    /// Resolve the drag gesture. Only a drop on a column zone mutates the
    /// store; dropping outside or cancelling clears the drag with no
    /// compensation needed, since nothing mutated yet.
    pub fn resolve_drop(&mut self, outcome: DragOutcome) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        self.mode = Mode::Navigate;

        match outcome {
            DragOutcome::DroppedOnColumn(status) => {
                if status != drag.from {
                    self.store.change_status(&drag.task_id, status);
                    self.status_message = Some(format!(
                        "moved \"{}\" to {}",
                        drag.title,
                        column_for(status).title
                    ));
                }
                if let Some(idx) = TaskStatus::ALL.iter().position(|s| *s == status) {
                    self.cursor_col = idx;
                }
                self.clamp_cursor();
            }
            DragOutcome::DroppedOutside | DragOutcome::Cancelled => {}
        }
    }
}

/// Run the TUI application
pub fn run(data_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = storage::resolve_data_dir(data_dir)?;
    let config = config_io::load_config(&data_dir)?;
    let kv = FileKv::open(&data_dir.join(STORE_FILE));
    let store = TaskStore::open(kv, &data_dir);

    let mut app = App::new(store, config, data_dir);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
