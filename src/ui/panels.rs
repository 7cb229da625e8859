use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{AppState, Mode, Pane};
use crate::fields::FieldKey;

use super::truncate_to_width;

pub const EMPTY_FIELDS_MESSAGE: &str = "Upload a PDF file to see extracted data";
pub const EMPTY_TEXT_MESSAGE: &str = "No text extracted yet";
pub const EMPTY_SAVED_MESSAGE: &str = "No saved documents";

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

pub fn draw_text_panel(frame: &mut Frame<'_>, area: Rect, app: &AppState) {
    let block = pane_block("Extracted text", app.focus == Pane::Text);
    let body = if app.text.is_empty() {
        Paragraph::new(EMPTY_TEXT_MESSAGE).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(app.text.as_str())
            .wrap(Wrap { trim: false })
            .scroll((app.text_scroll, 0))
    };
    frame.render_widget(body.block(block), area);
}

pub fn draw_fields_panel(frame: &mut Frame<'_>, area: Rect, app: &AppState) {
    let block = pane_block("Fields", app.focus == Pane::Fields);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if app.fields.is_empty() && !matches!(app.mode, Mode::EditField(_)) {
        frame.render_widget(
            Paragraph::new(EMPTY_FIELDS_MESSAGE)
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    }

    let label_width = FieldKey::ALL
        .iter()
        .map(|key| key.label().len())
        .max()
        .unwrap_or(0)
        + 2;
    let value_width = (inner.width as usize).saturating_sub(label_width + 2);
    let visible = inner.height as usize;
    let first = app
        .selected_field
        .saturating_sub(visible.saturating_sub(1));

    let lines: Vec<Line<'static>> = FieldKey::ALL
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(index, key)| field_line(app, *key, index, label_width, value_width))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn field_line(
    app: &AppState,
    key: FieldKey,
    index: usize,
    label_width: usize,
    value_width: usize,
) -> Line<'static> {
    let selected = app.focus == Pane::Fields && app.selected_field == index;
    let editing = app.mode == Mode::EditField(key);
    let marker = if selected { "> " } else { "  " };

    let value_span = match app.fields.get(key) {
        _ if editing => Span::styled(
            truncate_to_width(app.editor.value(), value_width),
            Style::default().add_modifier(Modifier::UNDERLINED),
        ),
        Some(value) if !value.is_empty() => Span::raw(truncate_to_width(value, value_width)),
        _ => Span::styled(
            key.placeholder().unwrap_or_default().to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let row_style = if selected {
        Style::default().bg(Color::Rgb(45, 45, 50))
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(marker),
        Span::styled(
            format!("{:<label_width$}", key.label()),
            Style::default().fg(Color::Gray),
        ),
        value_span,
    ])
    .style(row_style)
}

pub fn draw_saved_panel(frame: &mut Frame<'_>, area: Rect, app: &AppState) {
    let title = format!("Saved ({})", app.saved_documents.len());
    let block = pane_block(&title, app.focus == Pane::Saved);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if app.saved_documents.is_empty() {
        frame.render_widget(
            Paragraph::new(EMPTY_SAVED_MESSAGE).style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let visible = inner.height as usize;
    let first = app
        .selected_saved
        .saturating_sub(visible.saturating_sub(1));
    let width = inner.width as usize;
    let lines: Vec<Line<'static>> = app
        .saved_documents
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(index, doc)| {
            let selected = app.focus == Pane::Saved && app.selected_saved == index;
            let marker = if selected { "> " } else { "  " };
            let when = doc.created_at_local();
            let title_width = width.saturating_sub(marker.len() + when.len() + 1);
            let style = if selected {
                Style::default().bg(Color::Rgb(45, 45, 50))
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::raw(marker),
                Span::raw(format!(
                    "{:<title_width$}",
                    truncate_to_width(&doc.title, title_width)
                )),
                Span::raw(" "),
                Span::styled(when, Style::default().fg(Color::DarkGray)),
            ])
            .style(style)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}
