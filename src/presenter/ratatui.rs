use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Clear;
use ratatui_image::picker::{Picker, ProtocolType};
use ratatui_image::protocol::StatefulProtocol;
use ratatui_image::{FilterType, Resize, StatefulImage};

use crate::backend::RgbaFrame;
use crate::error::{AppError, AppResult};
use crate::viewer::RenderedPageKey;

use super::image_ops::{create_protocol, downscale_for_area};
use super::terminal_cell::{protocol_label, with_measured_cell_size};
use super::traits::ImagePresenter;

const ENCODE_FAILURE_MESSAGE: &str = "failed to encode terminal image";
const RESIZE_FILTER: FilterType = FilterType::Nearest;

struct ShownPage {
    key: RenderedPageKey,
    protocol: StatefulProtocol,
}

/// Draws page images through `ratatui-image`, using the best graphics protocol the
/// terminal answers to and falling back to halfblocks.
pub struct RatatuiImagePresenter {
    picker: Picker,
    protocol_type: ProtocolType,
    terminal_initialized: bool,
    last_area: Option<Rect>,
    shown: Option<ShownPage>,
}

impl Default for RatatuiImagePresenter {
    fn default() -> Self {
        Self {
            picker: Picker::halfblocks(),
            protocol_type: ProtocolType::Halfblocks,
            terminal_initialized: false,
            last_area: None,
            shown: None,
        }
    }
}

impl RatatuiImagePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn draw_protocol(
        frame: &mut Frame<'_>,
        area: Rect,
        protocol: &mut StatefulProtocol,
    ) -> AppResult<()> {
        frame.render_widget(Clear, area);
        frame.render_stateful_widget(
            StatefulImage::<StatefulProtocol>::default().resize(Resize::Fit(Some(RESIZE_FILTER))),
            area,
            protocol,
        );
        if let Some(result) = protocol.last_encoding_result() {
            result.map_err(|_| AppError::unsupported(ENCODE_FAILURE_MESSAGE))?;
        }
        Ok(())
    }
}

impl ImagePresenter for RatatuiImagePresenter {
    fn initialize_terminal(&mut self) -> AppResult<()> {
        if self.terminal_initialized {
            return Ok(());
        }
        match Picker::from_query_stdio() {
            Ok(picker) => {
                self.protocol_type = picker.protocol_type();
                self.picker = with_measured_cell_size(picker);
                self.shown = None;
            }
            Err(err) => {
                tracing::debug!(error = %err, "terminal graphics query failed; using halfblocks");
            }
        }
        self.terminal_initialized = true;
        Ok(())
    }

    fn status_label(&self) -> String {
        format!("ratatui-image/{}", protocol_label(self.protocol_type))
    }

    fn cell_px(&self) -> Option<(u16, u16)> {
        Some(self.picker.font_size())
    }

    fn show(&mut self, key: RenderedPageKey, frame: &RgbaFrame) -> AppResult<()> {
        let frame = match self.last_area {
            Some(area) => downscale_for_area(frame.clone(), area, self.picker.font_size())?,
            None => frame.clone(),
        };
        let protocol = create_protocol(&self.picker, frame)?;
        self.shown = Some(ShownPage { key, protocol });
        Ok(())
    }

    fn clear(&mut self) {
        self.shown = None;
    }

    fn shown_key(&self) -> Option<RenderedPageKey> {
        self.shown.as_ref().map(|shown| shown.key)
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect) -> AppResult<bool> {
        if area.width == 0 || area.height == 0 {
            return Ok(false);
        }
        self.last_area = Some(area);
        let Some(shown) = self.shown.as_mut() else {
            return Ok(false);
        };

        let target = shown.protocol.size_for(Resize::Fit(Some(RESIZE_FILTER)), area);
        let render_area = center_rect_within(area, target.width, target.height);
        Self::draw_protocol(frame, render_area, &mut shown.protocol)?;
        Ok(true)
    }
}

pub(crate) fn center_rect_within(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.max(1).min(area.width);
    let height = height.max(1).min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use super::{RatatuiImagePresenter, center_rect_within};
    use crate::backend::RgbaFrame;
    use crate::presenter::ImagePresenter;
    use crate::viewer::RenderedPageKey;

    fn frame() -> RgbaFrame {
        RgbaFrame {
            width: 8,
            height: 8,
            pixels: vec![40; 8 * 8 * 4].into(),
        }
    }

    #[test]
    fn center_rect_within_places_rect_in_the_middle() {
        let area = Rect::new(10, 5, 20, 10);
        assert_eq!(center_rect_within(area, 8, 4), Rect::new(16, 8, 8, 4));
        assert_eq!(center_rect_within(area, 99, 99), area);
    }

    #[test]
    fn show_tracks_key_and_clear_forgets_it() {
        let mut presenter = RatatuiImagePresenter::new();
        assert_eq!(presenter.status_label(), "ratatui-image/halfblocks");
        let key = RenderedPageKey::new(1, 1, 1.0);
        presenter.show(key, &frame()).expect("show should succeed");
        assert_eq!(presenter.shown_key(), Some(key));
        presenter.clear();
        assert_eq!(presenter.shown_key(), None);
    }

    #[test]
    fn show_rejects_inconsistent_frame() {
        let mut presenter = RatatuiImagePresenter::new();
        let broken = RgbaFrame {
            width: 8,
            height: 8,
            pixels: vec![0; 3].into(),
        };
        assert!(presenter.show(RenderedPageKey::new(1, 1, 1.0), &broken).is_err());
        assert_eq!(presenter.shown_key(), None);
    }

    #[test]
    fn render_draws_only_after_show() {
        let mut presenter = RatatuiImagePresenter::new();
        let mut terminal = Terminal::new(TestBackend::new(20, 10)).expect("terminal should init");

        let mut drew = true;
        terminal
            .draw(|f| drew = presenter.render(f, f.area()).expect("render should succeed"))
            .expect("draw should succeed");
        assert!(!drew);

        presenter
            .show(RenderedPageKey::new(1, 1, 1.0), &frame())
            .expect("show should succeed");
        terminal
            .draw(|f| drew = presenter.render(f, f.area()).expect("render should succeed"))
            .expect("draw should succeed");
        assert!(drew);
    }
}
