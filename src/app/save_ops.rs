use std::sync::Arc;
use std::time::Duration;

use crate::error::{AppError, AppResult};
use crate::event::{DomainEvent, SaveOutcome};
use crate::store::{SavedDocument, now_millis};
use crate::workflow::save::{SAVE_CONFLICT_MESSAGE, SAVE_FAILURE_MESSAGE, SAVE_SUCCESS_MESSAGE};
use crate::workflow::{NotificationKind, SaveDecision, export_fields, plan_save, save_title};

use super::core::App;

const NOTHING_TO_SAVE_STATUS: &str = "nothing to save yet";
const NOTHING_TO_EXPORT_STATUS: &str = "no fields to export";

impl App {
    /// Shows a notification and arms its dismissal timer.
    pub(crate) fn notify(&mut self, kind: NotificationKind, message: &str) -> u64 {
        let id = self.state.notifications.show(kind, message);
        let tx = self.event_tx.clone();
        let after = Duration::from_millis(self.config.notifications.dismiss_after_ms);
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = tx.send(DomainEvent::NotificationExpired { id });
        });
        id
    }

    pub(crate) fn on_notification_expired(&mut self, id: u64) {
        self.state.notifications.expire(id);
    }

    /// Saves the extracted text under the current file name unless a save is already
    /// running or an identical record is known.
    pub fn request_save(&mut self) {
        let title = save_title(self.state.file_name.as_deref());
        match plan_save(
            self.state.saving,
            &title,
            &self.state.text,
            &self.state.saved_documents,
        ) {
            SaveDecision::Busy => {
                tracing::debug!("save already in progress");
            }
            SaveDecision::NothingToSave => {
                self.state.status = NOTHING_TO_SAVE_STATUS.to_string();
            }
            SaveDecision::Duplicate => {
                tracing::info!(title = %title, "document already saved");
                self.notify(NotificationKind::Error, SAVE_CONFLICT_MESSAGE);
            }
            SaveDecision::Proceed => self.spawn_save(title),
        }
    }

    fn spawn_save(&mut self, title: String) {
        self.state.saving = true;
        self.documents_epoch = self.documents_epoch.wrapping_add(1);
        let epoch = self.documents_epoch;
        let content = self.state.text.clone();
        let store = Arc::clone(&self.store);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let job_title = title.clone();
            let job_content = content.clone();
            let joined = tokio::task::spawn_blocking(move || {
                let inserted = store.insert_document(&job_title, &job_content);
                let listed = inserted.is_ok().then(|| store.list_documents());
                (inserted, listed)
            })
            .await;
            let (inserted, listed) = joined.unwrap_or_else(|err| {
                (Err(AppError::persistence(format!("save task failed: {err}"))), None)
            });
            let _ = tx.send(DomainEvent::SaveComplete(SaveOutcome {
                title,
                content,
                epoch,
                inserted,
                listed,
            }));
        });
    }

    pub(crate) fn on_save_complete(&mut self, outcome: SaveOutcome) {
        self.state.saving = false;
        match outcome.inserted {
            Ok(id) => {
                tracing::info!(id = %id, title = %outcome.title, "document saved");
                self.notify(NotificationKind::Success, SAVE_SUCCESS_MESSAGE);
                match outcome.listed {
                    Some(Ok(documents)) => self.apply_documents(outcome.epoch, documents),
                    Some(Err(err)) => {
                        tracing::warn!(error = %err, "failed to reload saved documents");
                        self.state.saved_documents.insert(
                            0,
                            SavedDocument {
                                id,
                                title: outcome.title,
                                content: outcome.content,
                                created_at: now_millis(),
                            },
                        );
                    }
                    None => {}
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to save document");
                self.notify(NotificationKind::Error, SAVE_FAILURE_MESSAGE);
            }
        }
    }

    /// Reloads the saved-documents list off the event loop.
    pub fn refresh_documents(&mut self) {
        self.documents_epoch = self.documents_epoch.wrapping_add(1);
        let epoch = self.documents_epoch;
        let store = Arc::clone(&self.store);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(move || store.list_documents())
                .await
                .unwrap_or_else(|err| {
                    Err(AppError::persistence(format!("list task failed: {err}")))
                });
            let _ = tx.send(DomainEvent::DocumentsListed { epoch, result });
        });
    }

    pub(crate) fn on_documents_listed(
        &mut self,
        epoch: u64,
        result: AppResult<Vec<SavedDocument>>,
    ) {
        match result {
            Ok(documents) => self.apply_documents(epoch, documents),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load saved documents");
                self.state.status = format!("could not load saved documents: {err}");
            }
        }
    }

    /// A list older than the one already shown is dropped.
    fn apply_documents(&mut self, epoch: u64, documents: Vec<SavedDocument>) {
        if epoch <= self.applied_documents_epoch {
            tracing::debug!(epoch, "ignoring outdated documents list");
            return;
        }
        self.applied_documents_epoch = epoch;
        self.state.saved_documents = documents;
        if self.state.selected_saved >= self.state.saved_documents.len() {
            self.state.selected_saved = self.state.saved_documents.len().saturating_sub(1);
        }
    }

    pub fn export_current_fields(&mut self) {
        let directory = self.config.export.directory.clone();
        match export_fields(
            &self.state.fields,
            self.state.file_name.as_deref(),
            &directory,
        ) {
            Ok(path) => {
                let message = format!("Exported {}", path.display());
                self.state.status = message.clone();
                self.notify(NotificationKind::Success, &message);
            }
            Err(AppError::InvalidArgument(_)) => {
                self.state.status = NOTHING_TO_EXPORT_STATUS.to_string();
            }
            Err(err) => {
                tracing::warn!(error = %err, "export failed");
                self.notify(NotificationKind::Error, &format!("Export failed: {err}"));
            }
        }
    }
}
