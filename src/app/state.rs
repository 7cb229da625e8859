use tui_input::Input;

use crate::fields::{DocumentType, FieldKey, FieldMap};
use crate::store::SavedDocument;
use crate::viewer::ViewState;
use crate::workflow::NotificationCenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    OpenFile,
    GotoPage,
}

impl PromptKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::OpenFile => "Open PDF",
            Self::GotoPage => "Go to page",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    EditField(FieldKey),
    Prompt(PromptKind),
    Modal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    Text,
    #[default]
    Fields,
    Saved,
}

impl Pane {
    pub fn next(self) -> Self {
        match self {
            Self::Text => Self::Fields,
            Self::Fields => Self::Saved,
            Self::Saved => Self::Text,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Text => Self::Saved,
            Self::Fields => Self::Text,
            Self::Saved => Self::Fields,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    /// Name of the last selected file, set as soon as the user picks it.
    pub file_name: Option<String>,
    pub view: ViewState,
    pub document_type: DocumentType,
    pub fields: FieldMap,
    pub text: String,
    pub notifications: NotificationCenter,
    pub saving: bool,
    pub loading: bool,
    pub saved_documents: Vec<SavedDocument>,
    pub modal: Option<SavedDocument>,
    pub mode: Mode,
    pub focus: Pane,
    pub selected_field: usize,
    pub selected_saved: usize,
    pub text_scroll: u16,
    pub modal_scroll: u16,
    pub editor: Input,
    pub edit_origin: Option<String>,
    pub status: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            file_name: None,
            view: ViewState::NoDocument,
            document_type: DocumentType::default(),
            fields: FieldMap::sample(),
            text: String::new(),
            notifications: NotificationCenter::default(),
            saving: false,
            loading: false,
            saved_documents: Vec::new(),
            modal: None,
            mode: Mode::Normal,
            focus: Pane::default(),
            selected_field: 0,
            selected_saved: 0,
            text_scroll: 0,
            modal_scroll: 0,
            editor: Input::default(),
            edit_origin: None,
            status: String::new(),
        }
    }
}

impl AppState {
    pub fn selected_field_key(&self) -> FieldKey {
        FieldKey::ALL[self.selected_field.min(FieldKey::ALL.len() - 1)]
    }

    pub fn can_save(&self) -> bool {
        !self.text.is_empty() && !self.saving
    }

    pub fn can_export(&self) -> bool {
        !self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{AppState, Pane};
    use crate::fields::FieldKey;

    #[test]
    fn focus_cycles_both_ways() {
        for pane in [Pane::Text, Pane::Fields, Pane::Saved] {
            assert_eq!(pane.next().prev(), pane);
        }
        assert_eq!(Pane::Saved.next(), Pane::Text);
    }

    #[test]
    fn initial_state_shows_sample_fields_without_text() {
        let state = AppState::default();
        assert_eq!(state.fields.len(), FieldKey::ALL.len());
        assert!(!state.can_save());
        assert!(state.can_export());
        assert_eq!(state.selected_field_key(), FieldKey::InvoiceNumber);
    }
}
