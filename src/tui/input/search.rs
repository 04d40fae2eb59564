use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::unicode::prev_grapheme_boundary;

/// The search term filters the board live while it is typed. Enter keeps
/// the term and returns to Navigate; Esc clears it.
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.search_input.clear();
            app.mode = Mode::Navigate;
            app.clamp_cursor();
        }
        (_, KeyCode::Enter) => {
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Backspace) => {
            if let Some(boundary) = prev_grapheme_boundary(&app.search_input, app.search_input.len())
            {
                app.search_input.truncate(boundary);
                app.clamp_cursor();
            }
        }
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            app.search_input.push(c);
            app.clamp_cursor();
        }
        _ => {}
    }
}
