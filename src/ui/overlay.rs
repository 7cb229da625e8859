use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::PromptKind;
use crate::store::SavedDocument;
use crate::workflow::{Notification, NotificationKind};

use super::layout::centered_rect;
use super::truncate_to_width;

pub fn draw_loading_overlay(frame: &mut Frame<'_>, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let popup = centered_rect(area, area.width.min(30), area.height.min(3));
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Yellow));
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);
    frame.render_widget(
        Paragraph::new("Loading PDF...").alignment(Alignment::Center),
        inner,
    );
}

/// Toast in the top-right corner of `area`.
pub fn draw_notification(frame: &mut Frame<'_>, area: Rect, notification: &Notification) {
    if area.width < 4 || area.height < 3 {
        return;
    }
    let color = match notification.kind {
        NotificationKind::Success => Color::Green,
        NotificationKind::Error => Color::Red,
    };
    let max_text = (area.width as usize).saturating_sub(4).min(60);
    let message = truncate_to_width(&notification.message, max_text);
    let width = (unicode_width::UnicodeWidthStr::width(message.as_str()) + 4) as u16;
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + 1,
        width.min(area.width),
        3,
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(message).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        ),
        popup,
    );
}

pub fn draw_document_modal(frame: &mut Frame<'_>, area: Rect, document: &SavedDocument, scroll: u16) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let popup = centered_rect(
        area,
        area.width.saturating_sub(8).max(20),
        area.height.saturating_sub(4).max(6),
    );
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .title(format!(" {} ", document.title))
        .title_bottom(Line::from(format!(" saved {} ", document.created_at_local())).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(document.content.as_str())
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .block(block),
        popup,
    );
}

pub fn draw_prompt(frame: &mut Frame<'_>, area: Rect, kind: PromptKind, input: &str, cursor: usize) {
    if area.width == 0 || area.height < 3 {
        return;
    }

    let popup = centered_rect(area, area.width.min(72), 3);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .title(format!(" {} ", kind.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    frame.render_widget(
        Paragraph::new(build_input_line(input, cursor, inner.width as usize)),
        inner,
    );
}

/// Renders the input with a software caret, scrolled so the caret stays visible.
pub(crate) fn build_input_line(input: &str, cursor: usize, width: usize) -> Line<'static> {
    const PREFIX: &str = " > ";
    let text_width = width.saturating_sub(PREFIX.len()).max(1);

    let chars: Vec<char> = input.chars().collect();
    let cursor = cursor.min(chars.len());
    let start = cursor.saturating_sub(text_width.saturating_sub(1));
    let end = (start + text_width).min(chars.len());

    let mut spans = vec![Span::styled(PREFIX, Style::default().fg(Color::White))];
    let caret = cursor - start;
    for (idx, ch) in chars[start..end]
        .iter()
        .copied()
        .chain(std::iter::repeat(' '))
        .take(text_width)
        .enumerate()
    {
        if idx == caret {
            spans.push(Span::styled(
                ch.to_string(),
                Style::default().add_modifier(Modifier::REVERSED),
            ));
        } else {
            spans.push(Span::raw(ch.to_string()));
        }
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::build_input_line;

    fn plain(line: &ratatui::text::Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn input_line_pads_to_width() {
        let line = build_input_line("ab", 2, 10);
        assert_eq!(plain(&line), " > ab     ");
    }

    #[test]
    fn input_line_scrolls_to_keep_caret_visible() {
        let line = build_input_line("abcdefghij", 10, 8);
        let text = plain(&line);
        assert!(text.starts_with(" > "));
        assert!(text.contains("ghij"));
        assert!(!text.contains('a'));
    }
}
