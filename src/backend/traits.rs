use std::sync::Arc;

use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<[u8]>,
}

impl RgbaFrame {
    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixels_to_vec(&self) -> Vec<u8> {
        self.pixels.as_ref().to_vec()
    }
}

/// Pixel region and scale used to rasterize one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageViewport {
    pub width_px: u32,
    pub height_px: u32,
    pub scale: f32,
}

impl PageViewport {
    pub fn for_page(page_width_pt: f32, page_height_pt: f32, scale: f32) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        Self {
            width_px: scaled_px(page_width_pt, scale),
            height_px: scaled_px(page_height_pt, scale),
            scale,
        }
    }
}

fn scaled_px(points: f32, scale: f32) -> u32 {
    if !points.is_finite() || points <= 0.0 {
        return 1;
    }
    (points * scale).ceil().max(1.0) as u32
}

/// A decoded PDF. Page arguments are 0-based indices.
pub trait PdfBackend: Send {
    fn page_count(&self) -> usize;
    fn page_dimensions(&self, page: usize) -> AppResult<(f32, f32)>;
    fn render_page(&self, page: usize, viewport: &PageViewport) -> AppResult<RgbaFrame>;
    fn text_fragments(&self, page: usize) -> AppResult<Vec<String>>;
}

pub trait PdfEngine: Send + Sync {
    fn name(&self) -> &'static str;
    fn open_document(&self, bytes: Arc<Vec<u8>>) -> AppResult<Box<dyn PdfBackend>>;
}
