use std::sync::{Mutex, MutexGuard};

use crate::error::{AppError, AppResult};

use super::{DocumentId, DocumentStore, SavedDocument, now_millis, sort_newest_first};

/// Process-local store, used by tests and as a fallback when no data directory exists.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<Vec<SavedDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn documents(&self) -> AppResult<MutexGuard<'_, Vec<SavedDocument>>> {
        self.documents
            .lock()
            .map_err(|_| AppError::persistence("memory store lock poisoned"))
    }
}

impl DocumentStore for MemoryStore {
    fn insert_document(&self, title: &str, content: &str) -> AppResult<DocumentId> {
        let id = DocumentId::generate();
        self.documents()?.push(SavedDocument {
            id: id.clone(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: now_millis(),
        });
        Ok(id)
    }

    fn list_documents(&self) -> AppResult<Vec<SavedDocument>> {
        Ok(sort_newest_first(self.documents()?.clone()))
    }

    fn get_document(&self, id: &DocumentId) -> AppResult<Option<SavedDocument>> {
        Ok(self.documents()?.iter().find(|doc| &doc.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::store::{DocumentId, DocumentStore};

    #[test]
    fn insert_then_list_and_get() {
        let store = MemoryStore::new();
        let first = store.insert_document("a.pdf", "alpha").expect("insert");
        let second = store.insert_document("b.pdf", "beta").expect("insert");

        let listed = store.list_documents().expect("list");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second);
        assert_eq!(listed[1].id, first);

        let fetched = store.get_document(&first).expect("get").expect("present");
        assert_eq!(fetched.content, "alpha");
        assert!(
            store
                .get_document(&DocumentId::new("missing"))
                .expect("get")
                .is_none()
        );
    }

    #[test]
    fn store_does_not_deduplicate() {
        let store = MemoryStore::new();
        store.insert_document("a.pdf", "same").expect("insert");
        store.insert_document("a.pdf", "same").expect("insert");
        assert_eq!(store.len(), 2);
    }
}
