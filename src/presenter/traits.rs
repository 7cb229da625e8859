use ratatui::Frame;
use ratatui::layout::Rect;

use crate::backend::RgbaFrame;
use crate::error::AppResult;
use crate::viewer::RenderedPageKey;

/// Output surface for rasterized pages.
///
/// `show` replaces whatever is currently displayed; nothing else changes the surface
/// except `clear`.
pub trait ImagePresenter {
    fn initialize_terminal(&mut self) -> AppResult<()> {
        Ok(())
    }

    fn status_label(&self) -> String;

    /// Pixel size of one terminal cell, when known.
    fn cell_px(&self) -> Option<(u16, u16)> {
        None
    }

    fn show(&mut self, key: RenderedPageKey, frame: &RgbaFrame) -> AppResult<()>;

    fn clear(&mut self);

    fn shown_key(&self) -> Option<RenderedPageKey>;

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect) -> AppResult<bool>;
}
