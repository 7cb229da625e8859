use crate::backend::PageViewport;
use crate::viewer::{RenderTask, RenderWorkerResult, RenderedPageKey};

use super::core::App;

impl App {
    /// Key of the page the view state asks for right now, if a document is shown.
    pub(crate) fn current_render_key(&self) -> Option<RenderedPageKey> {
        let view = self.state.view.current()?;
        let doc = self.document.as_ref()?;
        Some(RenderedPageKey::new(doc.load_id, view.current_page, view.scale))
    }

    /// Puts the current page on screen from cache, or queues it unless it is already
    /// displayed or being rendered.
    pub(crate) fn request_current_render(&mut self) {
        let Some(key) = self.current_render_key() else {
            return;
        };
        if self.render.presenter.shown_key() == Some(key) {
            return;
        }
        if let Some(frame) = self.render.cache.get(&key) {
            if let Err(err) = self.render.presenter.show(key, &frame) {
                tracing::warn!(page = key.page, error = %err, "failed to show cached page");
            }
            return;
        }

        let Some(viewport) = self.viewport_for(key) else {
            return;
        };
        let Some(worker) = self.render.worker.as_mut() else {
            return;
        };
        if worker.has_in_flight(&key) {
            return;
        }
        if worker.enqueue(RenderTask { key, viewport }) {
            tracing::trace!(page = key.page, scale_milli = key.scale_milli, "render queued");
        }
    }

    fn viewport_for(&self, key: RenderedPageKey) -> Option<PageViewport> {
        let doc = self.document.as_ref()?;
        let (width_pt, height_pt) = *doc.page_sizes.get(key.page.checked_sub(1)?)?;
        let scale = key.scale_milli as f32 / 1000.0 * self.config.viewer.pixel_ratio;
        Some(PageViewport::for_page(width_pt, height_pt, scale))
    }

    /// Applies a finished render against the view state as it is now, not as it was when
    /// the render was queued.
    pub(crate) fn on_render_complete(&mut self, completed: RenderWorkerResult) {
        if self
            .document
            .as_ref()
            .is_none_or(|doc| doc.load_id != completed.key.load_id)
        {
            return;
        }
        let current = self.current_render_key();

        match completed.result {
            Ok(frame) => {
                tracing::trace!(
                    page = completed.key.page,
                    elapsed_ms = completed.elapsed.as_millis() as u64,
                    "page rendered"
                );
                if current == Some(completed.key) {
                    if let Err(err) = self.render.presenter.show(completed.key, &frame) {
                        tracing::warn!(page = completed.key.page, error = %err, "failed to show page");
                    }
                    self.render.cache.insert(completed.key, frame);
                } else {
                    self.render.cache.insert(completed.key, frame);
                    if current.is_some_and(|key| !self.render.failed.contains(&key)) {
                        self.request_current_render();
                    }
                }
            }
            Err(err) => {
                tracing::warn!(page = completed.key.page, error = %err, "page render failed");
                self.render.failed.insert(completed.key);
            }
        }
    }
}
