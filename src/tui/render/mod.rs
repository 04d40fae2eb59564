pub mod board_view;
pub mod confirm_popup;
pub mod form_modal;
pub mod header;
pub mod help_overlay;
pub mod status_row;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode};

/// Main render function — dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header | board | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    board_view::render_board(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[2]);

    // Modal layers (rendered on top of the board)
    match app.mode {
        Mode::Form => form_modal::render_form_modal(frame, app, frame.area()),
        Mode::Confirm => confirm_popup::render_confirm_popup(frame, app, frame.area()),
        _ => {}
    }

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }
}

/// Centered rect of at most `width` x `height` cells within `area`.
pub(super) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width - w) / 2;
    let y = area.y + (area.height - h) / 2;
    Rect::new(x, y, w, h)
}
