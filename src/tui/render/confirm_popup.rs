use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

/// Render the delete confirmation popup.
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(confirm) = &app.confirm else {
        return;
    };
    let theme = &app.theme;

    let rect = super::centered_rect(50, 5, area);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error))
        .title(Span::styled(
            " delete task ",
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let width = inner.width.saturating_sub(2) as usize;
    let question = format!("delete \"{}\"?", confirm.title);
    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", truncate_to_width(&question, width)),
            Style::default().fg(theme.text_bright),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " y delete · n cancel",
            Style::default().fg(theme.dim),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
