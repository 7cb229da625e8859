use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::backend::{PdfEngine, load_shared_bytes};
use crate::error::{AppError, AppResult};
use crate::event::{DecodedDocument, DomainEvent};
use crate::viewer::{EXTRACTION_FAILURE_MESSAGE, RenderWorker, extract_document_text};
use crate::workflow::NotificationKind;

use super::core::{App, LoadedDocument};

const DECODE_FAILURE_NOTICE: &str = "Could not open the PDF file";
const FALLBACK_PAGE_SIZE_PT: (f32, f32) = (612.0, 792.0);

impl App {
    /// Starts loading a file. The name is recorded immediately; decoding happens on a
    /// blocking thread and reports back with `DocumentDecoded`.
    pub fn open_file(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.state.file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .or_else(|| Some(path.display().to_string()));
        self.latest_load_id = self.latest_load_id.wrapping_add(1);
        let load_id = self.latest_load_id;
        self.state.loading = true;
        tracing::info!(load_id, path = %path.display(), "opening document");

        let engine = Arc::clone(&self.engine);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let joined = tokio::task::spawn_blocking(move || decode_file(&path, engine)).await;
            let result = joined.unwrap_or_else(|err| {
                Err(AppError::decode(format!("decode task failed: {err}")))
            });
            let _ = tx.send(DomainEvent::DocumentDecoded { load_id, result });
        });
    }

    pub(crate) fn on_document_decoded(&mut self, load_id: u64, result: AppResult<DecodedDocument>) {
        if load_id != self.latest_load_id {
            tracing::debug!(load_id, "ignoring superseded document");
            return;
        }
        self.state.loading = false;

        let decoded = match result.and_then(|decoded| {
            self.state.view.load_document(decoded.page_sizes.len())?;
            Ok(decoded)
        }) {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::warn!(load_id, error = %err, "failed to decode document");
                self.state.text = EXTRACTION_FAILURE_MESSAGE.to_string();
                self.state.fields.clear();
                self.notify(NotificationKind::Error, DECODE_FAILURE_NOTICE);
                return;
            }
        };

        let page_count = decoded.page_sizes.len();
        tracing::info!(load_id, page_count, "document decoded");
        self.render.cache.retain_load(load_id);
        self.render.presenter.clear();
        self.render.failed.clear();
        self.state.text_scroll = 0;
        self.render.worker = match RenderWorker::spawn(
            Arc::clone(&self.engine),
            Arc::clone(&decoded.bytes),
            load_id,
            self.config.viewer.render_workers,
        ) {
            Ok(worker) => Some(worker),
            Err(err) => {
                tracing::warn!(error = %err, "render workers unavailable");
                None
            }
        };
        self.document = Some(LoadedDocument {
            load_id,
            bytes: Arc::clone(&decoded.bytes),
            page_sizes: decoded.page_sizes,
        });
        self.request_current_render();
        self.spawn_extraction(load_id, decoded.bytes);
    }

    fn spawn_extraction(&self, load_id: u64, bytes: Arc<Vec<u8>>) {
        let engine = Arc::clone(&self.engine);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let joined = tokio::task::spawn_blocking(move || {
                let doc = engine.open_document(bytes)?;
                extract_document_text(doc.as_ref())
            })
            .await;
            let result = joined.unwrap_or_else(|err| {
                Err(AppError::unsupported(format!("extraction task failed: {err}")))
            });
            let _ = tx.send(DomainEvent::TextExtracted { load_id, result });
        });
    }

    pub(crate) fn on_text_extracted(&mut self, load_id: u64, result: AppResult<String>) {
        if load_id != self.latest_load_id {
            tracing::debug!(load_id, "ignoring text from superseded document");
            return;
        }
        match result {
            Ok(text) => {
                tracing::info!(load_id, chars = text.chars().count(), "text extracted");
                self.state.fields = self.extractor.extract(&text);
                self.state.text = text;
            }
            Err(err) => {
                tracing::warn!(load_id, error = %err, "text extraction failed");
                self.state.text = EXTRACTION_FAILURE_MESSAGE.to_string();
                self.state.fields.clear();
            }
        }
        self.state.text_scroll = 0;
    }
}

fn decode_file(path: &Path, engine: Arc<dyn PdfEngine>) -> AppResult<DecodedDocument> {
    let bytes = load_shared_bytes(path)?;
    let doc = engine.open_document(Arc::clone(&bytes))?;
    let page_sizes = (0..doc.page_count())
        .map(|page| {
            doc.page_dimensions(page).unwrap_or_else(|err| {
                tracing::warn!(page = page + 1, error = %err, "page size unavailable");
                FALLBACK_PAGE_SIZE_PT
            })
        })
        .collect();
    Ok(DecodedDocument { bytes, page_sizes })
}
