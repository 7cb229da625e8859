use ratatui::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, Mode};

use super::layout::UiLayout;
use super::truncate_to_width;

const NO_FILE_LABEL: &str = "no file";

pub fn draw_chrome(frame: &mut Frame<'_>, layout: UiLayout, app: &AppState) {
    frame.render_widget(
        Paragraph::new(header_line(app, layout.header.width as usize)),
        layout.header,
    );
    frame.render_widget(
        Paragraph::new(status_text(app, layout.status.width as usize))
            .style(Style::default().fg(Color::Gray)),
        layout.status,
    );
}

fn header_line(app: &AppState, width: usize) -> Line<'static> {
    let file = app.file_name.as_deref().unwrap_or(NO_FILE_LABEL);
    let position = match app.view.current() {
        Some(view) => format!(
            "page {}/{} | zoom {}%",
            view.current_page,
            view.total_pages,
            view.zoom_percent()
        ),
        None => "page -/- | zoom -".to_string(),
    };
    let tail = format!(" | {} | {position}", app.document_type);
    let file_width = width.saturating_sub(tail.len() + 1);

    Line::from(vec![
        Span::raw(" "),
        Span::styled(
            truncate_to_width(file, file_width),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(tail),
    ])
}

pub(crate) fn status_text(app: &AppState, width: usize) -> String {
    let mode = match app.mode {
        Mode::Normal => "NORMAL",
        Mode::EditField(_) => "EDIT",
        Mode::Prompt(_) => "PROMPT",
        Mode::Modal => "VIEW",
    };
    let mut parts = vec![mode.to_string()];
    if app.loading {
        parts.push("loading".to_string());
    }
    if app.saving {
        parts.push("saving".to_string());
    }
    if !app.status.is_empty() {
        parts.push(app.status.clone());
    }
    parts.push(hint(app.mode).to_string());
    truncate_to_width(&format!(" {}", parts.join(" | ")), width)
}

fn hint(mode: Mode) -> &'static str {
    match mode {
        Mode::Normal => "o open  j/k page  +/- zoom  s save  e export  t type  q quit",
        Mode::EditField(_) => "enter done  esc revert",
        Mode::Prompt(_) => "enter submit  esc cancel",
        Mode::Modal => "j/k scroll  esc close",
    }
}
