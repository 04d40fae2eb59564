use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::board::column_for;
use crate::tui::app::{App, FormField, FormState};
use crate::tui::theme::Theme;
use crate::util::unicode::display_width;

const LABEL_WIDTH: usize = 13;

/// Render the create/edit form as a centered modal.
pub fn render_form_modal(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };
    let theme = &app.theme;

    let rect = super::centered_rect(64, 14, area);
    frame.render_widget(Clear, rect);

    let title = if form.editing.is_some() {
        " edit task "
    } else {
        " new task "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_bright)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let mut lines = vec![
        text_field_line(theme, form, FormField::Title, "Title", &form.title),
        text_field_line(
            theme,
            form,
            FormField::Description,
            "Description",
            &form.description,
        ),
        select_field_line(
            theme,
            form,
            FormField::Status,
            "Status",
            column_for(form.status).title,
        ),
        select_field_line(
            theme,
            form,
            FormField::Priority,
            "Priority",
            form.priority.as_str(),
        ),
        text_field_line(theme, form, FormField::DueDate, "Due date", &form.due_date),
        Line::from(""),
    ];

    match &form.error {
        Some(error) => lines.push(Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(theme.error),
        ))),
        None => lines.push(Line::from("")),
    }
    lines.push(Line::from(Span::styled(
        " enter save · esc cancel · tab next field · ←/→ adjust",
        Style::default().fg(theme.dim),
    )));

    frame.render_widget(Paragraph::new(lines), inner);

    // Terminal cursor inside the focused text field
    if let Some((buffer, cursor, row)) = focused_text_field(form) {
        let x = inner.x + LABEL_WIDTH as u16 + display_width(&buffer[..cursor]) as u16;
        let y = inner.y + row;
        if x < inner.right() && y < inner.bottom() {
            frame.set_cursor_position(Position::new(x, y));
        }
    }
}

/// The focused field's buffer, byte cursor, and display row, if it is a
/// text field.
fn focused_text_field(form: &FormState) -> Option<(&str, usize, u16)> {
    match form.focus {
        FormField::Title => Some((&form.title, form.title_cursor, 0)),
        FormField::Description => Some((&form.description, form.description_cursor, 1)),
        FormField::DueDate => Some((&form.due_date, form.due_date_cursor, 4)),
        FormField::Status | FormField::Priority => None,
    }
}

fn label_span<'a>(theme: &Theme, form: &FormState, field: FormField, label: &'a str) -> Span<'a> {
    let style = if form.focus == field {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };
    Span::styled(format!(" {:<width$}", label, width = LABEL_WIDTH - 1), style)
}

fn text_field_line<'a>(
    theme: &Theme,
    form: &FormState,
    field: FormField,
    label: &'a str,
    value: &'a str,
) -> Line<'a> {
    Line::from(vec![
        label_span(theme, form, field, label),
        Span::styled(value, Style::default().fg(theme.text_bright)),
    ])
}

fn select_field_line<'a>(
    theme: &Theme,
    form: &FormState,
    field: FormField,
    label: &'a str,
    value: &'a str,
) -> Line<'a> {
    let focused = form.focus == field;
    let arrows = if focused {
        Style::default().fg(theme.highlight)
    } else {
        Style::default().fg(theme.dim)
    };
    Line::from(vec![
        label_span(theme, form, field, label),
        Span::styled("‹ ", arrows),
        Span::styled(value, Style::default().fg(theme.text_bright)),
        Span::styled(" ›", arrows),
    ])
}
