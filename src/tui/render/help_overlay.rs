use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay = super::centered_rect(48, 20, area);
    frame.render_widget(Clear, overlay);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Board", header_style)));
    add_binding(&mut lines, " ↑↓/jk", "move between cards", key_style, desc_style);
    add_binding(&mut lines, " ←→/hl", "move between columns", key_style, desc_style);
    add_binding(&mut lines, " x", "expand/collapse column", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Tasks", header_style)));
    add_binding(&mut lines, " n", "new task", key_style, desc_style);
    add_binding(&mut lines, " e/enter", "edit task", key_style, desc_style);
    add_binding(&mut lines, " d", "delete task (asks first)", key_style, desc_style);
    add_binding(&mut lines, " m/space", "pick up card, drop with enter", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" View", header_style)));
    add_binding(&mut lines, " /", "search title and description", key_style, desc_style);
    add_binding(&mut lines, " s", "cycle sort", key_style, desc_style);
    add_binding(&mut lines, " p", "cycle priority filter", key_style, desc_style);
    add_binding(&mut lines, " q", "quit", key_style, desc_style);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " any key to close",
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight))
        .title(Span::styled(" help ", header_style))
        .style(Style::default().bg(bg));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);
    frame.render_widget(Paragraph::new(lines), inner);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    description: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    lines.push(Line::from(vec![
        Span::styled(format!("{:<10}", key), key_style),
        Span::styled(description, desc_style),
    ]));
}
