use crate::error::{AppError, AppResult};
use crate::store::{DocumentId, DocumentStore, SavedDocument};

pub const DEFAULT_TITLE: &str = "Untitled PDF";
pub const SAVE_SUCCESS_MESSAGE: &str = "Text saved successfully";
pub const SAVE_CONFLICT_MESSAGE: &str = "This text is already saved";
pub const SAVE_FAILURE_MESSAGE: &str = "Error while saving";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDecision {
    /// Another save has not completed yet.
    Busy,
    NothingToSave,
    Duplicate,
    Proceed,
}

pub fn save_title(file_name: Option<&str>) -> String {
    match file_name {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => DEFAULT_TITLE.to_string(),
    }
}

pub fn find_duplicate<'a>(
    saved: &'a [SavedDocument],
    title: &str,
    content: &str,
) -> Option<&'a SavedDocument> {
    saved.iter().find(|doc| doc.matches(title, content))
}

/// Decides what a save request should do given the known list of saved documents.
pub fn plan_save(
    in_progress: bool,
    title: &str,
    content: &str,
    saved: &[SavedDocument],
) -> SaveDecision {
    if in_progress {
        return SaveDecision::Busy;
    }
    if content.is_empty() {
        return SaveDecision::NothingToSave;
    }
    if find_duplicate(saved, title, content).is_some() {
        return SaveDecision::Duplicate;
    }
    SaveDecision::Proceed
}

/// One-shot save for headless callers: checks the store's current list for an identical
/// record before inserting.
pub fn save_unique(store: &dyn DocumentStore, title: &str, content: &str) -> AppResult<DocumentId> {
    let saved = store.list_documents()?;
    match plan_save(false, title, content, &saved) {
        SaveDecision::Proceed => store.insert_document(title, content),
        SaveDecision::Duplicate => Err(AppError::SaveConflict),
        SaveDecision::NothingToSave | SaveDecision::Busy => {
            Err(AppError::invalid_argument("document has no text to save"))
        }
    }
}
