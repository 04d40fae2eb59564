use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::board::BOARD_COLUMNS;
use crate::tui::app::{App, Mode};

/// Render the dashboard header: app name, live per-column counts, and the
/// active search term.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let theme = &app.theme;

    let mut title_spans = vec![
        Span::styled(
            "[#] taskflow",
            Style::default()
                .fg(theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   ", Style::default().bg(bg)),
    ];

    for (i, column) in BOARD_COLUMNS.iter().enumerate() {
        if i > 0 {
            title_spans.push(Span::styled("  ·  ", Style::default().fg(theme.dim).bg(bg)));
        }
        let count = app.store.count_by_status(column.status);
        title_spans.push(Span::styled(
            "● ",
            Style::default().fg(theme.status_color(column.status)).bg(bg),
        ));
        title_spans.push(Span::styled(
            format!("{} {}", count, column.title.to_lowercase()),
            Style::default().fg(theme.text).bg(bg),
        ));
    }

    let search_line = if app.mode == Mode::Search {
        Line::from(vec![
            Span::styled(
                format!("/{}", app.search_input),
                Style::default().fg(theme.text_bright).bg(bg),
            ),
            Span::styled("\u{258C}", Style::default().fg(theme.highlight).bg(bg)),
        ])
    } else if !app.search_input.is_empty() {
        Line::from(Span::styled(
            format!("/{}", app.search_input),
            Style::default().fg(theme.dim).bg(bg),
        ))
    } else {
        Line::from(Span::styled(
            "press / to search, ? for help",
            Style::default().fg(theme.dim).bg(bg),
        ))
    };

    let lines = vec![Line::from(title_spans), search_line];
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
