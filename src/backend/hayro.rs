use std::sync::Arc;

use hayro::hayro_interpret::font::Glyph;
use hayro::hayro_interpret::util::{PageExt, RectExt};
use hayro::hayro_interpret::{
    BlendMode, ClipPath, Context, Device, GlyphDrawMode, Image, InterpreterSettings, Paint,
    PathDrawMode, SoftMask, interpret_page,
};
use hayro::hayro_syntax::Pdf;
use hayro::hayro_syntax::page::Page;
use hayro::vello_cpu::color::palette::css::WHITE;
use hayro::{RenderSettings, render};
use kurbo::{Affine, BezPath, Point};

use crate::error::{AppError, AppResult};

use super::traits::{PageViewport, PdfBackend, PdfEngine, RgbaFrame};

const PDF_HEADER: &[u8] = b"%PDF-";

#[derive(Debug, Default)]
pub struct HayroEngine;

impl PdfEngine for HayroEngine {
    fn name(&self) -> &'static str {
        "hayro"
    }

    fn open_document(&self, bytes: Arc<Vec<u8>>) -> AppResult<Box<dyn PdfBackend>> {
        HayroDocument::open(bytes).map(|doc| Box::new(doc) as Box<dyn PdfBackend>)
    }
}

pub struct HayroDocument {
    pdf: Pdf,
}

impl PdfBackend for HayroDocument {
    fn page_count(&self) -> usize {
        self.pdf.pages().len()
    }

    fn page_dimensions(&self, page: usize) -> AppResult<(f32, f32)> {
        Ok(self.page(page)?.render_dimensions())
    }

    fn render_page(&self, page: usize, viewport: &PageViewport) -> AppResult<RgbaFrame> {
        if !viewport.scale.is_finite() || viewport.scale <= 0.0 {
            return Err(AppError::invalid_argument(
                "scale must be a positive finite value",
            ));
        }
        let page_ref = self.page(page)?;

        let render_settings = RenderSettings {
            x_scale: viewport.scale,
            y_scale: viewport.scale,
            bg_color: WHITE,
            ..Default::default()
        };
        let interpreter_settings = InterpreterSettings::default();
        let pixmap = render(page_ref, &interpreter_settings, &render_settings);

        Ok(RgbaFrame {
            width: pixmap.width() as u32,
            height: pixmap.height() as u32,
            pixels: pixmap.data_as_u8_slice().to_vec().into(),
        })
    }

    fn text_fragments(&self, page: usize) -> AppResult<Vec<String>> {
        let page_ref = self.page(page)?;
        Ok(collect_fragments(page_ref))
    }
}

impl HayroDocument {
    pub fn open(bytes: Arc<Vec<u8>>) -> AppResult<Self> {
        if !bytes.as_slice().starts_with(PDF_HEADER) {
            return Err(AppError::decode("input is not a valid PDF header"));
        }
        let pdf = Pdf::new(bytes).map_err(|_| AppError::decode("hayro could not parse the file"))?;
        if pdf.pages().len() == 0 {
            return Err(AppError::decode("document has no pages"));
        }

        Ok(Self { pdf })
    }

    fn page(&self, page: usize) -> AppResult<&Page<'_>> {
        self.pdf
            .pages()
            .get(page)
            .ok_or(AppError::invalid_argument("page index is out of range"))
    }
}

fn collect_fragments(page: &Page<'_>) -> Vec<String> {
    let mut context = Context::new(
        page.initial_transform(true),
        page.intersected_crop_box().to_kurbo(),
        page.xref(),
        InterpreterSettings::default(),
    );
    let mut device = FragmentDevice::default();
    interpret_page(page, &mut context, &mut device);
    device.finish()
}

/// Groups glyphs into one fragment per visual line.
#[derive(Default)]
struct FragmentDevice {
    fragments: Vec<String>,
    current: String,
    last_point: Option<Point>,
    last_glyph: Option<(char, i32, i32)>,
}

impl FragmentDevice {
    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.fragments
    }

    fn flush(&mut self) {
        let fragment = self.current.trim();
        if !fragment.is_empty() {
            self.fragments.push(fragment.to_owned());
        }
        self.current.clear();
    }

    fn push_char(&mut self, ch: char, x: f64, y: f64) {
        if ch == '\n' || ch == '\r' {
            self.flush();
            self.last_point = Some(Point::new(x, y));
            return;
        }
        if ch.is_whitespace() {
            if !self.current.is_empty() && !self.current.ends_with(' ') {
                self.current.push(' ');
            }
            self.last_point = Some(Point::new(x, y));
            return;
        }

        if let Some(last) = self.last_point
            && (y - last.y).abs() > LINE_BREAK_THRESHOLD
        {
            self.flush();
        }

        self.current.push(ch);
        self.last_point = Some(Point::new(x, y));
    }

    fn is_duplicate_glyph(&self, ch: char, x: f64, y: f64) -> bool {
        self.last_glyph == Some((ch, quantize_coord(x), quantize_coord(y)))
    }

    fn set_last_glyph(&mut self, ch: char, x: f64, y: f64) {
        self.last_glyph = Some((ch, quantize_coord(x), quantize_coord(y)));
    }
}

impl<'a> Device<'a> for FragmentDevice {
    fn set_soft_mask(&mut self, _mask: Option<SoftMask<'a>>) {}

    fn set_blend_mode(&mut self, _blend_mode: BlendMode) {}

    fn draw_path(
        &mut self,
        _path: &BezPath,
        _transform: Affine,
        _paint: &Paint<'a>,
        _draw_mode: &PathDrawMode,
    ) {
    }

    fn push_clip_path(&mut self, _clip_path: &ClipPath) {}

    fn push_transparency_group(
        &mut self,
        _opacity: f32,
        _mask: Option<SoftMask<'a>>,
        _blend_mode: BlendMode,
    ) {
    }

    fn draw_glyph(
        &mut self,
        glyph: &Glyph<'a>,
        transform: Affine,
        glyph_transform: Affine,
        _paint: &Paint<'a>,
        _draw_mode: &GlyphDrawMode,
    ) {
        let Some(ch) = glyph.as_unicode() else {
            return;
        };

        let position = (transform * glyph_transform) * Point::ORIGIN;
        if self.is_duplicate_glyph(ch, position.x, position.y) {
            return;
        }

        self.set_last_glyph(ch, position.x, position.y);
        self.push_char(ch, position.x, position.y);
    }

    fn draw_image(&mut self, _image: Image<'a, '_>, _transform: Affine) {}

    fn pop_clip_path(&mut self) {}

    fn pop_transparency_group(&mut self) {}
}

fn quantize_coord(value: f64) -> i32 {
    (value * 100.0).round() as i32
}

const LINE_BREAK_THRESHOLD: f64 = 6.0;
