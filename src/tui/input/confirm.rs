use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

/// Second phase of the two-phase delete: only an explicit `y` reaches the
/// store.
pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('y')) => app.confirm_delete(),
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => app.cancel_delete(),
        _ => {}
    }
}
