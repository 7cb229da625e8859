use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::Event;

use crate::error::AppResult;
use crate::input::Command;
use crate::store::{DocumentId, SavedDocument};
use crate::viewer::RenderWorkerResult;

/// Result of decoding an upload off the event loop.
#[derive(Debug, Clone)]
pub struct DecodedDocument {
    pub bytes: Arc<Vec<u8>>,
    /// Page sizes in PDF points, 0-based.
    pub page_sizes: Vec<(f32, f32)>,
}

#[derive(Debug)]
pub struct SaveOutcome {
    pub title: String,
    pub content: String,
    pub epoch: u64,
    pub inserted: AppResult<DocumentId>,
    /// Present only when the insert succeeded.
    pub listed: Option<AppResult<Vec<SavedDocument>>>,
}

/// Everything the event loop reacts to. State is only mutated while handling one of these.
#[derive(Debug)]
pub enum DomainEvent {
    Input(Event),
    InputError(String),
    Command(Command),
    OpenFile(PathBuf),
    DocumentDecoded {
        load_id: u64,
        result: AppResult<DecodedDocument>,
    },
    TextExtracted {
        load_id: u64,
        result: AppResult<String>,
    },
    RenderComplete(RenderWorkerResult),
    SaveComplete(SaveOutcome),
    DocumentsListed {
        epoch: u64,
        result: AppResult<Vec<SavedDocument>>,
    },
    NotificationExpired {
        id: u64,
    },
}
