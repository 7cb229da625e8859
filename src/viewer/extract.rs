use crate::backend::PdfBackend;
use crate::error::{AppError, AppResult};

pub const EXTRACTION_FAILURE_MESSAGE: &str =
    "Failed to read PDF file. Please try opening it again.";

const FRAGMENT_SEPARATOR: &str = " ";
const PAGE_TERMINATOR: &str = "\n\n";

/// Collects the text of every page in order. All or nothing: the first failing page
/// aborts the whole extraction.
pub fn extract_document_text(doc: &dyn PdfBackend) -> AppResult<String> {
    let total = doc.page_count();
    let mut text = String::new();
    for index in 0..total {
        let page = index + 1;
        let fragments = doc
            .text_fragments(index)
            .map_err(|err| AppError::extraction(page, err))?;
        text.push_str(&fragments.join(FRAGMENT_SEPARATOR));
        text.push_str(PAGE_TERMINATOR);
        tracing::trace!(page, fragments = fragments.len(), "page text extracted");
    }
    Ok(text)
}
