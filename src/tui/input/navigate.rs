use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::task::TaskStatus;
use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Quit
        (KeyModifiers::NONE, KeyCode::Char('q')) => app.should_quit = true,
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => app.should_quit = true,

        // Help
        (_, KeyCode::Char('?')) => app.show_help = true,

        // Card cursor
        (KeyModifiers::NONE, KeyCode::Down | KeyCode::Char('j')) => move_row(app, 1),
        (KeyModifiers::NONE, KeyCode::Up | KeyCode::Char('k')) => move_row(app, -1),
        (KeyModifiers::NONE, KeyCode::Left | KeyCode::Char('h')) => move_col(app, -1),
        (KeyModifiers::NONE, KeyCode::Right | KeyCode::Char('l')) => move_col(app, 1),
        (KeyModifiers::NONE, KeyCode::Char('g')) | (_, KeyCode::Home) => {
            app.cursor_row = 0;
        }
        (KeyModifiers::SHIFT, KeyCode::Char('G')) | (_, KeyCode::End) => {
            let len = app.visible_len(app.cursor_status());
            app.cursor_row = len.saturating_sub(1);
        }

        // Task CRUD
        (KeyModifiers::NONE, KeyCode::Char('n')) => app.open_create_form(),
        (KeyModifiers::NONE, KeyCode::Char('e')) | (_, KeyCode::Enter) => app.open_edit_form(),
        (KeyModifiers::NONE, KeyCode::Char('d')) => app.request_delete(),

        // Pick up the card for a column move
        (KeyModifiers::NONE, KeyCode::Char('m') | KeyCode::Char(' ')) => app.grab_selected(),

        // Search
        (KeyModifiers::NONE, KeyCode::Char('/')) => app.mode = Mode::Search,

        // View controls
        (KeyModifiers::NONE, KeyCode::Char('s')) => app.cycle_sort(),
        (KeyModifiers::NONE, KeyCode::Char('p')) => app.cycle_filter(),
        (KeyModifiers::NONE, KeyCode::Char('x')) => app.toggle_expand(),

        _ => {}
    }
}

fn move_row(app: &mut App, direction: i32) {
    let len = app.visible_len(app.cursor_status());
    if len == 0 {
        app.cursor_row = 0;
        return;
    }
    let new_row = (app.cursor_row as i32 + direction).clamp(0, len as i32 - 1);
    app.cursor_row = new_row as usize;
}

fn move_col(app: &mut App, direction: i32) {
    let max = TaskStatus::ALL.len() as i32 - 1;
    let new_col = (app.cursor_col as i32 + direction).clamp(0, max);
    app.cursor_col = new_col as usize;
    app.clamp_cursor();
}
