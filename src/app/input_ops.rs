use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::error::AppResult;
use crate::event::DomainEvent;
use crate::fields::FieldKey;
use crate::input::{Command, map_normal_key, parse_goto};
use crate::viewer::NavOutcome;

use super::core::App;
use super::state::{Mode, Pane, PromptKind};

impl App {
    /// Single entry point for state changes. Background completions and user input are
    /// all funneled through here by the event loop.
    pub fn handle_event(&mut self, event: DomainEvent) -> AppResult<()> {
        match event {
            DomainEvent::Input(Event::Key(key))
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) =>
            {
                self.handle_key(key);
            }
            DomainEvent::Input(_) => {}
            DomainEvent::InputError(message) => {
                tracing::warn!(%message, "terminal input error");
                self.state.status = format!("input error: {message}");
            }
            DomainEvent::Command(command) => self.execute_command(command),
            DomainEvent::OpenFile(path) => self.open_file(path),
            DomainEvent::DocumentDecoded { load_id, result } => {
                self.on_document_decoded(load_id, result);
            }
            DomainEvent::TextExtracted { load_id, result } => {
                self.on_text_extracted(load_id, result);
            }
            DomainEvent::RenderComplete(completed) => self.on_render_complete(completed),
            DomainEvent::SaveComplete(outcome) => self.on_save_complete(outcome),
            DomainEvent::DocumentsListed { epoch, result } => {
                self.on_documents_listed(epoch, result);
            }
            DomainEvent::NotificationExpired { id } => self.on_notification_expired(id),
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.state.mode {
            Mode::Normal => {
                if let Some(command) = map_normal_key(key, self.keymap) {
                    self.execute_command(command);
                }
            }
            Mode::EditField(field) => self.handle_edit_key(field, key),
            Mode::Prompt(kind) => self.handle_prompt_key(kind, key),
            Mode::Modal => self.handle_modal_key(key),
        }
    }

    pub fn execute_command(&mut self, command: Command) {
        tracing::trace!(command = command.name(), "command");
        let step = self.config.viewer.zoom_step;
        let view = &mut self.state.view;
        let outcome = match command {
            Command::NextPage => view.next_page(),
            Command::PrevPage => view.prev_page(),
            Command::FirstPage => view.first_page(),
            Command::LastPage => view.last_page(),
            Command::GotoPage(page) => view.goto_page(page),
            Command::ZoomIn => view.zoom_in(step),
            Command::ZoomOut => view.zoom_out(step),
            Command::ResetZoom => view.reset_zoom(),
            other => {
                self.execute_form_command(other);
                return;
            }
        };
        if outcome == NavOutcome::Changed {
            self.render.failed.clear();
            self.request_current_render();
        }
    }

    fn execute_form_command(&mut self, command: Command) {
        match command {
            Command::FocusNext => self.state.focus = self.state.focus.next(),
            Command::FocusPrev => self.state.focus = self.state.focus.prev(),
            Command::SelectNext => self.move_selection(1),
            Command::SelectPrev => self.move_selection(-1),
            Command::Activate => self.activate_selection(),
            Command::Save => self.request_save(),
            Command::Export => self.export_current_fields(),
            Command::CycleDocumentType => {
                self.state.document_type = self.state.document_type.next();
            }
            Command::OpenFilePrompt => self.open_prompt(PromptKind::OpenFile),
            Command::GotoPrompt => {
                if self.state.view.is_ready() {
                    self.open_prompt(PromptKind::GotoPage);
                }
            }
            Command::Cancel => self.state.status.clear(),
            Command::Quit => self.quit_requested = true,
            Command::NextPage
            | Command::PrevPage
            | Command::FirstPage
            | Command::LastPage
            | Command::GotoPage(_)
            | Command::ZoomIn
            | Command::ZoomOut
            | Command::ResetZoom => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        match self.state.focus {
            Pane::Text => {
                self.state.text_scroll = self.state.text_scroll.saturating_add_signed(delta as i16);
            }
            Pane::Fields => {
                self.state.selected_field =
                    step_index(self.state.selected_field, delta, FieldKey::ALL.len());
            }
            Pane::Saved => {
                self.state.selected_saved = step_index(
                    self.state.selected_saved,
                    delta,
                    self.state.saved_documents.len(),
                );
            }
        }
    }

    fn activate_selection(&mut self) {
        match self.state.focus {
            Pane::Fields => self.begin_field_edit(self.state.selected_field_key()),
            Pane::Saved => self.open_saved_document(self.state.selected_saved),
            Pane::Text => {}
        }
    }

    pub(crate) fn begin_field_edit(&mut self, field: FieldKey) {
        let origin = self.state.fields.get(field).map(str::to_string);
        self.state.editor = Input::new(origin.clone().unwrap_or_default());
        self.state.edit_origin = origin;
        self.state.mode = Mode::EditField(field);
    }

    fn handle_edit_key(&mut self, field: FieldKey, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Tab => self.finish_field_edit(),
            KeyCode::Esc => {
                match self.state.edit_origin.take() {
                    Some(origin) => self.state.fields.set_field(field, origin),
                    None => {
                        self.state.fields.remove(field);
                    }
                }
                self.finish_field_edit();
            }
            _ => {
                if self.state.editor.handle_event(&Event::Key(key)).is_none() {
                    return;
                }
                self.state.fields.apply_edit(field, self.state.editor.value());
                if field.is_identifier() {
                    let formatted = self.state.fields.get(field).unwrap_or_default();
                    if formatted != self.state.editor.value() {
                        self.state.editor = Input::new(formatted.to_string());
                    }
                }
            }
        }
    }

    fn finish_field_edit(&mut self) {
        self.state.edit_origin = None;
        self.state.editor.reset();
        self.state.mode = Mode::Normal;
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        self.state.editor = Input::default();
        self.state.mode = Mode::Prompt(kind);
    }

    fn handle_prompt_key(&mut self, kind: PromptKind, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state.editor.reset();
                self.state.mode = Mode::Normal;
            }
            KeyCode::Enter => {
                let value = self.state.editor.value().trim().to_string();
                self.state.editor.reset();
                self.state.mode = Mode::Normal;
                self.submit_prompt(kind, &value);
            }
            _ => {
                self.state.editor.handle_event(&Event::Key(key));
            }
        }
    }

    fn submit_prompt(&mut self, kind: PromptKind, value: &str) {
        match kind {
            PromptKind::OpenFile => {
                if value.is_empty() {
                    return;
                }
                self.open_file(value);
            }
            PromptKind::GotoPage => match parse_goto(value) {
                Some(command) => self.execute_command(command),
                None => self.state.status = format!("not a page number: {value}"),
            },
        }
    }

    /// Shows a saved record in the modal. Out-of-range indexes are ignored.
    pub fn open_saved_document(&mut self, index: usize) {
        let Some(document) = self.state.saved_documents.get(index).cloned() else {
            return;
        };
        self.state.selected_saved = index;
        self.state.modal = Some(document);
        self.state.modal_scroll = 0;
        self.state.mode = Mode::Modal;
    }

    pub fn close_modal(&mut self) {
        self.state.modal = None;
        self.state.modal_scroll = 0;
        self.state.mode = Mode::Normal;
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => self.close_modal(),
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.modal_scroll = self.state.modal_scroll.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.modal_scroll = self.state.modal_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }
}

/// Moves within `0..len`, saturating at both ends.
fn step_index(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}
