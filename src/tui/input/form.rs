use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::task::{TaskPriority, TaskStatus};
use crate::tui::app::{App, FormField};
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.close_form(),
        (_, KeyCode::Enter) => app.submit_form(),

        // Field focus
        (_, KeyCode::Tab) | (_, KeyCode::Down) => focus_move(app, true),
        (_, KeyCode::BackTab) | (_, KeyCode::Up) => focus_move(app, false),

        // Cursor movement in text fields, value cycling in selects
        (_, KeyCode::Left) => left_right(app, -1),
        (_, KeyCode::Right) => left_right(app, 1),
        (_, KeyCode::Home) => cursor_to_edge(app, true),
        (_, KeyCode::End) => cursor_to_edge(app, false),

        // Editing
        (_, KeyCode::Backspace) => backspace(app),
        (_, KeyCode::Delete) => delete_forward(app),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => insert_char(app, c),

        _ => {}
    }
}

fn focus_move(app: &mut App, forward: bool) {
    if let Some(form) = &mut app.form {
        form.focus = if forward {
            form.focus.next()
        } else {
            form.focus.prev()
        };
    }
}

fn insert_char(app: &mut App, c: char) {
    let Some(form) = &mut app.form else { return };
    form.error = None;
    if let Some((buffer, cursor)) = form.buffer_mut() {
        buffer.insert(*cursor, c);
        *cursor += c.len_utf8();
    }
}

fn backspace(app: &mut App) {
    let Some(form) = &mut app.form else { return };
    form.error = None;
    if let Some((buffer, cursor)) = form.buffer_mut()
        && let Some(boundary) = prev_grapheme_boundary(buffer, *cursor)
    {
        buffer.replace_range(boundary..*cursor, "");
        *cursor = boundary;
    }
}

fn delete_forward(app: &mut App) {
    let Some(form) = &mut app.form else { return };
    form.error = None;
    if let Some((buffer, cursor)) = form.buffer_mut()
        && *cursor < buffer.len()
    {
        let end = next_grapheme_boundary(buffer, *cursor).unwrap_or(buffer.len());
        buffer.replace_range(*cursor..end, "");
    }
}

/// Left/Right moves the cursor in text fields and cycles the value in the
/// status/priority selects.
fn left_right(app: &mut App, direction: i32) {
    let Some(form) = &mut app.form else { return };
    match form.focus {
        FormField::Status => {
            form.status = cycle_status(form.status, direction);
        }
        FormField::Priority => {
            form.priority = cycle_priority(form.priority, direction);
        }
        _ => {
            if let Some((buffer, cursor)) = form.buffer_mut() {
                if direction < 0 {
                    if let Some(boundary) = prev_grapheme_boundary(buffer, *cursor) {
                        *cursor = boundary;
                    }
                } else if let Some(boundary) = next_grapheme_boundary(buffer, *cursor) {
                    *cursor = boundary;
                }
            }
        }
    }
}

fn cursor_to_edge(app: &mut App, start: bool) {
    let Some(form) = &mut app.form else { return };
    if let Some((buffer, cursor)) = form.buffer_mut() {
        *cursor = if start { 0 } else { buffer.len() };
    }
}

fn cycle_status(status: TaskStatus, direction: i32) -> TaskStatus {
    let len = TaskStatus::ALL.len() as i32;
    let idx = TaskStatus::ALL.iter().position(|s| *s == status).unwrap_or(0) as i32;
    TaskStatus::ALL[((idx + direction).rem_euclid(len)) as usize]
}

fn cycle_priority(priority: TaskPriority, direction: i32) -> TaskPriority {
    let len = TaskPriority::ALL.len() as i32;
    let idx = TaskPriority::ALL
        .iter()
        .position(|p| *p == priority)
        .unwrap_or(0) as i32;
    TaskPriority::ALL[((idx + direction).rem_euclid(len)) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_cycle_wraps_both_ways() {
        assert_eq!(cycle_status(TaskStatus::Todo, 1), TaskStatus::Doing);
        assert_eq!(cycle_status(TaskStatus::Todo, -1), TaskStatus::Done);
        assert_eq!(cycle_status(TaskStatus::Done, 1), TaskStatus::Todo);
    }

    #[test]
    fn priority_cycle_wraps_both_ways() {
        assert_eq!(cycle_priority(TaskPriority::Low, -1), TaskPriority::High);
        assert_eq!(cycle_priority(TaskPriority::High, 1), TaskPriority::Low);
    }
}
