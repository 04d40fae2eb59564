use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::board::column_for;
use crate::model::task::{Task, TaskStatus};
use crate::ops::board::{ColumnView, derive};
use crate::tui::app::{App, Mode};
use crate::util::unicode::truncate_to_width;

/// Render the three-column board.
pub fn render_board(frame: &mut Frame, app: &App, area: Rect) {
    let query = app.board_query();
    let view = derive(app.store.tasks(), &query);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (idx, status) in TaskStatus::ALL.into_iter().enumerate() {
        render_column(frame, app, chunks[idx], &view[&status], idx);
    }
}

fn render_column(frame: &mut Frame, app: &App, area: Rect, column: &ColumnView, col_idx: usize) {
    let theme = &app.theme;
    let accent = theme.status_color(column.status);
    let is_cursor_col = app.cursor_col == col_idx;
    let is_drop_target = app
        .drag
        .as_ref()
        .is_some_and(|d| d.target == column.status);

    let border_style = if is_drop_target {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else if is_cursor_col {
        Style::default().fg(accent)
    } else {
        Style::default().fg(theme.dim)
    };

    let count_label = if column.is_truncated() {
        format!(" {}/{} ", column.visible.len(), column.total)
    } else {
        format!(" {} ", column.total)
    };
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", column_for(column.status).title),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(count_label, Style::default().fg(theme.dim)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let mut lines: Vec<Line> = Vec::new();

    if column.visible.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " no tasks",
            Style::default().fg(theme.dim),
        )));
    }

    for (row, task) in column.visible.iter().enumerate() {
        let selected = is_cursor_col && row == app.cursor_row && app.mode != Mode::Drag;
        let dragging = app.drag.as_ref().is_some_and(|d| d.task_id == task.id);
        push_card(app, &mut lines, task, width, selected, dragging);
    }

    if column.is_truncated() {
        lines.push(Line::from(Span::styled(
            format!(" + {} more (x to expand)", column.hidden()),
            Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn push_card(
    app: &App,
    lines: &mut Vec<Line>,
    task: &Task,
    width: usize,
    selected: bool,
    dragging: bool,
) {
    let theme = &app.theme;
    let card_bg = if selected {
        Style::default().bg(theme.selection_bg)
    } else {
        Style::default()
    };

    let marker = if dragging { "» " } else { "│ " };
    let marker_style = card_bg.fg(theme.priority_color(task.priority));

    // Title line
    let title_style = if selected {
        card_bg.fg(theme.text_bright).add_modifier(Modifier::BOLD)
    } else {
        card_bg.fg(theme.text_bright)
    };
    let title_width = width.saturating_sub(2);
    lines.push(Line::from(vec![
        Span::styled(marker, marker_style),
        Span::styled(truncate_to_width(&task.title, title_width), title_style),
    ]));

    // Meta line: priority tag, creation date, optional due date
    let mut meta = vec![
        Span::styled(marker, marker_style),
        Span::styled(
            task.priority.as_str(),
            card_bg.fg(theme.priority_color(task.priority)),
        ),
        Span::styled(
            format!(" · {}", task.created_at.format("%b %e")),
            card_bg.fg(theme.dim),
        ),
    ];
    if let Some(due) = task.due_date {
        meta.push(Span::styled(
            format!(" · due {}", due.format("%Y-%m-%d")),
            card_bg.fg(theme.doing),
        ));
    }
    lines.push(Line::from(meta));

    // Description line, when present
    if let Some(description) = &task.description {
        lines.push(Line::from(vec![
            Span::styled(marker, marker_style),
            Span::styled(
                truncate_to_width(description, title_width),
                card_bg.fg(theme.dim),
            ),
        ]));
    }

    lines.push(Line::from(""));
}
