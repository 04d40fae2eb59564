use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, DragOutcome};

/// A picked-up card moves between columns with h/l and resolves to a
/// single discriminated outcome; the store only ever sees the resulting
/// `change_status` call.
pub(super) fn handle_drag(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Left | KeyCode::Char('h')) => app.retarget_drag(-1),
        (KeyModifiers::NONE, KeyCode::Right | KeyCode::Char('l')) => app.retarget_drag(1),

        // Drop on the targeted column
        (_, KeyCode::Enter) | (KeyModifiers::NONE, KeyCode::Char('m') | KeyCode::Char(' ')) => {
            match app.drag.as_ref().map(|d| d.target) {
                Some(target) => app.resolve_drop(DragOutcome::DroppedOnColumn(target)),
                None => app.resolve_drop(DragOutcome::DroppedOutside),
            }
        }

        // Cancel: nothing mutated yet, so clearing the drag is enough
        (_, KeyCode::Esc) => app.resolve_drop(DragOutcome::Cancelled),

        _ => {}
    }
}
