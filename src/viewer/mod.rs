pub mod cache;
pub mod extract;
pub mod nav;
pub mod render;

pub use cache::{RenderedPageCache, RenderedPageKey};
pub use extract::{EXTRACTION_FAILURE_MESSAGE, extract_document_text};
pub use nav::{NavOutcome, PageView, ViewState};
pub use render::{RenderTask, RenderWorker, RenderWorkerResult};
