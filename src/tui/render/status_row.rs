use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

/// Render the status row (bottom of screen): mode context and transient
/// messages on the left, the active sort/filter on the right.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let theme = &app.theme;
    let width = area.width as usize;

    let left: Vec<Span> = match app.mode {
        Mode::Drag => {
            let label = app
                .drag
                .as_ref()
                .map(|d| format!("moving \"{}\"", d.title))
                .unwrap_or_default();
            vec![
                Span::styled(label, Style::default().fg(theme.highlight).bg(bg)),
                Span::styled(
                    "  h/l choose column · enter drop · esc cancel",
                    Style::default().fg(theme.dim).bg(bg),
                ),
            ]
        }
        Mode::Search => vec![Span::styled(
            "searching — enter keep · esc clear",
            Style::default().fg(theme.dim).bg(bg),
        )],
        _ => match &app.status_message {
            Some(message) => vec![Span::styled(
                message.clone(),
                Style::default().fg(theme.text).bg(bg),
            )],
            None => vec![Span::styled(
                "n new · e edit · d delete · m move",
                Style::default().fg(theme.dim).bg(bg),
            )],
        },
    };

    let right = format!(
        "sort: {} · filter: {}",
        app.sort_key.label(),
        app.priority_filter.as_str()
    );

    let mut spans = left;
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let right_width = right.chars().count();
    if content_width + right_width < width {
        let padding = width - content_width - right_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(right, Style::default().fg(theme.dim).bg(bg)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}
