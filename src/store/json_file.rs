use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

use super::{DocumentId, DocumentStore, SavedDocument, now_millis, sort_newest_first};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct StoreFile {
    documents: Vec<SavedDocument>,
}

/// Keeps every record in one JSON file. Writes go to a sibling temp file that is then
/// renamed over the original.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(AppError::invalid_argument("store path must not be empty"));
        }
        if path.is_dir() {
            return Err(AppError::invalid_argument(format!(
                "store path is a directory: {}",
                path.display()
            )));
        }
        let store = Self {
            path,
            write_lock: Mutex::new(()),
        };
        // Surface a corrupt file at startup rather than on first save.
        store.read_file()?;
        Ok(store)
    }

    fn read_file(&self) -> AppResult<StoreFile> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(StoreFile::default()),
            Err(err) => {
                return Err(AppError::io_with_context(
                    err,
                    format!("failed to read store {}", self.path.display()),
                ));
            }
        };
        if raw.trim().is_empty() {
            return Ok(StoreFile::default());
        }
        serde_json::from_str(&raw).map_err(|err| {
            AppError::persistence(format!("corrupt store {}: {err}", self.path.display()))
        })
    }

    fn write_file(&self, file: &StoreFile) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|err| {
                AppError::io_with_context(
                    err,
                    format!("failed to create store directory {}", parent.display()),
                )
            })?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(file)?;
        fs::write(&tmp_path, json).map_err(|err| {
            AppError::io_with_context(err, format!("failed to write {}", tmp_path.display()))
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|err| {
            AppError::io_with_context(
                err,
                format!("failed to replace store {}", self.path.display()),
            )
        })
    }
}

impl DocumentStore for JsonFileStore {
    fn insert_document(&self, title: &str, content: &str) -> AppResult<DocumentId> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AppError::persistence("store write lock poisoned"))?;

        let mut file = self.read_file()?;
        let id = DocumentId::generate();
        file.documents.push(SavedDocument {
            id: id.clone(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: now_millis(),
        });
        self.write_file(&file)?;
        tracing::debug!(%id, path = %self.path.display(), "document stored");
        Ok(id)
    }

    fn list_documents(&self) -> AppResult<Vec<SavedDocument>> {
        Ok(sort_newest_first(self.read_file()?.documents))
    }

    fn get_document(&self, id: &DocumentId) -> AppResult<Option<SavedDocument>> {
        Ok(self
            .read_file()?
            .documents
            .into_iter()
            .find(|doc| &doc.id == id))
    }
}
