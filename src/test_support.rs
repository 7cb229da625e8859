//! Fakes and fixtures shared by the unit tests.

use std::sync::{Arc, Mutex};

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::backend::{PageViewport, PdfBackend, PdfEngine, RgbaFrame};
use crate::error::{AppError, AppResult};
use crate::store::{DocumentId, DocumentStore, SavedDocument};
use crate::presenter::ImagePresenter;
use crate::viewer::RenderedPageKey;

pub(crate) const FAKE_PAGE_SIZE_PT: (f32, f32) = (100.0, 100.0);

/// In-memory document whose pages hold fixed text fragments.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeBackend {
    pages: Vec<Vec<String>>,
    fail_text_on: Option<usize>,
    fail_render_on: Option<usize>,
}

impl FakeBackend {
    pub(crate) fn with_pages(pages: &[&[&str]]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|fragments| fragments.iter().map(|f| (*f).to_string()).collect())
                .collect(),
            ..Self::default()
        }
    }

    pub(crate) fn with_page_count(count: usize) -> Self {
        Self {
            pages: (1..=count).map(|page| vec![format!("page {page}")]).collect(),
            ..Self::default()
        }
    }

    /// Makes text extraction of the 0-based `index` fail.
    pub(crate) fn fail_text_on(mut self, index: usize) -> Self {
        self.fail_text_on = Some(index);
        self
    }

    /// Makes rendering of the 0-based `index` fail.
    pub(crate) fn fail_render_on(mut self, index: usize) -> Self {
        self.fail_render_on = Some(index);
        self
    }

    fn check_page(&self, page: usize) -> AppResult<()> {
        if page >= self.pages.len() {
            return Err(AppError::invalid_argument(format!("page {page} out of range")));
        }
        Ok(())
    }
}

impl PdfBackend for FakeBackend {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_dimensions(&self, page: usize) -> AppResult<(f32, f32)> {
        self.check_page(page)?;
        Ok(FAKE_PAGE_SIZE_PT)
    }

    fn render_page(&self, page: usize, viewport: &PageViewport) -> AppResult<RgbaFrame> {
        self.check_page(page)?;
        if self.fail_render_on == Some(page) {
            return Err(AppError::unsupported("broken page"));
        }
        let len = viewport.width_px as usize * viewport.height_px as usize * 4;
        Ok(RgbaFrame {
            width: viewport.width_px,
            height: viewport.height_px,
            pixels: vec![255; len].into(),
        })
    }

    fn text_fragments(&self, page: usize) -> AppResult<Vec<String>> {
        self.check_page(page)?;
        if self.fail_text_on == Some(page) {
            return Err(AppError::unsupported("unreadable text layer"));
        }
        Ok(self.pages[page].clone())
    }
}

/// Hands out copies of one `FakeBackend`; bytes without a `%PDF` header fail to decode.
pub(crate) struct FakeEngine {
    backend: FakeBackend,
}

impl FakeEngine {
    pub(crate) fn new(backend: FakeBackend) -> Self {
        Self { backend }
    }
}

impl PdfEngine for FakeEngine {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn open_document(&self, bytes: Arc<Vec<u8>>) -> AppResult<Box<dyn PdfBackend>> {
        if !bytes.starts_with(b"%PDF") {
            return Err(AppError::decode("missing PDF header"));
        }
        Ok(Box::new(self.backend.clone()))
    }
}

/// Presenter that remembers every page it was asked to show.
#[derive(Debug, Default)]
pub(crate) struct RecordingPresenter {
    pub(crate) shows: Arc<Mutex<Vec<RenderedPageKey>>>,
    current: Option<RenderedPageKey>,
}

impl ImagePresenter for RecordingPresenter {
    fn status_label(&self) -> String {
        "recording".to_string()
    }

    fn show(&mut self, key: RenderedPageKey, _frame: &RgbaFrame) -> AppResult<()> {
        if let Ok(mut shows) = self.shows.lock() {
            shows.push(key);
        }
        self.current = Some(key);
        Ok(())
    }

    fn clear(&mut self) {
        self.current = None;
    }

    fn shown_key(&self) -> Option<RenderedPageKey> {
        self.current
    }

    fn render(&mut self, _frame: &mut Frame<'_>, _area: Rect) -> AppResult<bool> {
        Ok(self.current.is_some())
    }
}

/// Store whose inserts always fail; listing works and is empty.
#[derive(Debug, Default)]
pub(crate) struct FailingStore;

impl DocumentStore for FailingStore {
    fn insert_document(&self, _title: &str, _content: &str) -> AppResult<DocumentId> {
        Err(AppError::persistence("store unavailable"))
    }

    fn list_documents(&self) -> AppResult<Vec<SavedDocument>> {
        Ok(Vec::new())
    }

    fn get_document(&self, _id: &DocumentId) -> AppResult<Option<SavedDocument>> {
        Ok(None)
    }
}

/// Builds a minimal PDF with one Helvetica text line per page.
pub(crate) fn build_pdf(page_texts: &[&str]) -> Vec<u8> {
    let streams: Vec<String> = page_texts
        .iter()
        .map(|text| {
            format!(
                "BT /F1 14 Tf 36 260 Td ({}) Tj ET",
                escape_literal_string(text)
            )
        })
        .collect();
    build_pdf_from_streams(&streams)
}

/// Builds a PDF whose pages use the given content streams verbatim.
pub(crate) fn build_pdf_with_raw_streams(page_streams: &[&str]) -> Vec<u8> {
    let streams: Vec<String> = page_streams.iter().map(|s| (*s).to_string()).collect();
    build_pdf_from_streams(&streams)
}

fn build_pdf_from_streams(page_streams: &[String]) -> Vec<u8> {
    let empty = [String::new()];
    let page_streams = if page_streams.is_empty() {
        &empty[..]
    } else {
        page_streams
    };
    let page_count = page_streams.len();

    let kids = (0..page_count)
        .map(|i| format!("{} 0 R", 4 + i * 2))
        .collect::<Vec<_>>()
        .join(" ");
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{kids}] /Count {page_count} >>"),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];
    for (index, stream) in page_streams.iter().enumerate() {
        let content_id = 5 + index * 2;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 300 300] /Resources << /Font << /F1 3 0 R >> >> /Contents {content_id} 0 R >>"
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{stream}\nendstream",
            stream.len()
        ));
    }

    let mut bytes = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, object) in objects.iter().enumerate() {
        offsets.push(bytes.len());
        bytes.extend_from_slice(format!("{} 0 obj\n{object}\nendobj\n", index + 1).as_bytes());
    }

    let xref_start = bytes.len();
    bytes.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        bytes.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    bytes.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    bytes
}

fn escape_literal_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}
