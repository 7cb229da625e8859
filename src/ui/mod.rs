mod chrome;
mod layout;
mod overlay;
mod panels;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::app::{AppState, Mode};
use crate::presenter::ImagePresenter;

pub use chrome::draw_chrome;
pub use layout::{UiLayout, split_layout};
pub use overlay::{draw_document_modal, draw_loading_overlay, draw_notification, draw_prompt};
pub use panels::{
    EMPTY_FIELDS_MESSAGE, draw_fields_panel, draw_saved_panel, draw_text_panel,
};

const EMPTY_VIEWER_MESSAGE: &str = "Press o to open a PDF";

/// Draws one full frame from the current state.
pub fn draw(frame: &mut Frame<'_>, app: &AppState, presenter: &mut dyn ImagePresenter) {
    let layout = split_layout(frame.area());
    draw_chrome(frame, layout, app);
    draw_viewer(frame, layout.viewer, app, presenter);
    draw_text_panel(frame, layout.text, app);
    draw_fields_panel(frame, layout.fields, app);
    draw_saved_panel(frame, layout.saved, app);

    if app.loading {
        draw_loading_overlay(frame, layout.viewer);
    }
    match app.mode {
        Mode::Prompt(kind) => draw_prompt(
            frame,
            frame.area(),
            kind,
            app.editor.value(),
            app.editor.visual_cursor(),
        ),
        Mode::Modal => {
            if let Some(document) = &app.modal {
                draw_document_modal(frame, frame.area(), document, app.modal_scroll);
            }
        }
        Mode::Normal | Mode::EditField(_) => {}
    }
    if let Some(notification) = app.notifications.current() {
        draw_notification(frame, frame.area(), notification);
    }
}

fn draw_viewer(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &AppState,
    presenter: &mut dyn ImagePresenter,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !app.view.is_ready() {
        frame.render_widget(
            Paragraph::new(EMPTY_VIEWER_MESSAGE).style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }
    if let Err(err) = presenter.render(frame, inner) {
        tracing::warn!(error = %err, "failed to draw page image");
    }
}

/// Cuts `text` to at most `width` terminal columns, marking the cut with an ellipsis.
pub(crate) fn truncate_to_width(text: &str, width: usize) -> String {
    let total: usize = text.chars().map(|ch| ch.width().unwrap_or(0)).sum();
    if total <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::app::AppState;
    use crate::fields::FieldMap;
    use crate::test_support::RecordingPresenter;
    use crate::viewer::ViewState;
    use crate::workflow::NotificationKind;

    use super::{EMPTY_FIELDS_MESSAGE, draw, truncate_to_width};

    fn screen(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("test terminal");
        let mut presenter = RecordingPresenter::default();
        terminal
            .draw(|frame| draw(frame, state, &mut presenter))
            .expect("draw should succeed");
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn truncate_respects_wide_characters() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn empty_field_map_shows_upload_hint() {
        let state = AppState {
            fields: FieldMap::new(),
            ..AppState::default()
        };
        assert!(screen(&state).contains(EMPTY_FIELDS_MESSAGE));
    }

    #[test]
    fn header_shows_page_and_zoom_once_loaded() {
        let mut state = AppState {
            file_name: Some("Invoice.pdf".to_string()),
            ..AppState::default()
        };
        state.view = ViewState::NoDocument;
        state.view.load_document(3).expect("non-empty document");
        state.view.next_page();
        let text = screen(&state);
        assert!(text.contains("Invoice.pdf"));
        assert!(text.contains("page 2/3 | zoom 100%"));
    }

    #[test]
    fn notification_is_drawn_on_top() {
        let mut state = AppState::default();
        state
            .notifications
            .show(NotificationKind::Success, "Text saved successfully");
        assert!(screen(&state).contains("Text saved successfully"));
    }
}
