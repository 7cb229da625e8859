use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted piece of extracted text. Records are never updated after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedDocument {
    pub id: DocumentId,
    pub title: String,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl SavedDocument {
    pub fn created_at_local(&self) -> String {
        match Utc.timestamp_millis_opt(self.created_at).single() {
            Some(utc) => DateTime::<Local>::from(utc)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            None => "unknown time".to_string(),
        }
    }

    pub fn matches(&self, title: &str, content: &str) -> bool {
        self.title == title && self.content == content
    }
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// CRUD gateway for saved documents. Listing is newest first.
pub trait DocumentStore: Send + Sync {
    fn insert_document(&self, title: &str, content: &str) -> AppResult<DocumentId>;
    fn list_documents(&self) -> AppResult<Vec<SavedDocument>>;
    fn get_document(&self, id: &DocumentId) -> AppResult<Option<SavedDocument>>;
}

/// Orders records newest first; records sharing a timestamp keep the later insert first.
pub(crate) fn sort_newest_first(mut documents: Vec<SavedDocument>) -> Vec<SavedDocument> {
    documents.reverse();
    documents.sort_by(|left, right| right.created_at.cmp(&left.created_at));
    documents
}

#[cfg(test)]
mod tests {
    use super::{DocumentId, SavedDocument, sort_newest_first};

    fn doc(id: &str, created_at: i64) -> SavedDocument {
        SavedDocument {
            id: DocumentId::new(id),
            title: id.to_string(),
            content: "text".to_string(),
            created_at,
        }
    }

    #[test]
    fn sort_orders_by_timestamp_then_insertion() {
        let sorted = sort_newest_first(vec![doc("a", 10), doc("b", 30), doc("c", 10)]);
        let ids: Vec<_> = sorted.iter().map(|doc| doc.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(DocumentId::generate(), DocumentId::generate());
    }

    #[test]
    fn matches_requires_title_and_content() {
        let saved = doc("report.pdf", 1);
        assert!(saved.matches("report.pdf", "text"));
        assert!(!saved.matches("report.pdf", "other"));
        assert!(!saved.matches("other.pdf", "text"));
    }

    #[test]
    fn created_at_local_handles_out_of_range_values() {
        assert_eq!(doc("x", i64::MAX).created_at_local(), "unknown time");
        assert!(!doc("x", 0).created_at_local().is_empty());
    }
}
