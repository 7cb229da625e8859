use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapPreset {
    Default,
    Emacs,
}

impl KeymapPreset {
    pub fn parse(value: &str) -> Self {
        match value {
            "emacs" => Self::Emacs,
            _ => Self::Default,
        }
    }
}

/// Maps a key pressed while no field, prompt or modal has focus.
pub fn map_normal_key(key: KeyEvent, preset: KeymapPreset) -> Option<Command> {
    match preset {
        KeymapPreset::Default => map_default(key),
        KeymapPreset::Emacs => map_emacs(key),
    }
}

fn map_default(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            KeyCode::Char('s') => Some(Command::Save),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::PageDown | KeyCode::Right => Some(Command::NextPage),
        KeyCode::Char('k') | KeyCode::PageUp | KeyCode::Left => Some(Command::PrevPage),
        KeyCode::Char('g') | KeyCode::Home => Some(Command::FirstPage),
        KeyCode::Char('G') | KeyCode::End => Some(Command::LastPage),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::ZoomIn),
        KeyCode::Char('-') => Some(Command::ZoomOut),
        KeyCode::Char('0') => Some(Command::ResetZoom),
        KeyCode::Char(':') => Some(Command::GotoPrompt),
        KeyCode::Tab => Some(Command::FocusNext),
        KeyCode::BackTab => Some(Command::FocusPrev),
        KeyCode::Down => Some(Command::SelectNext),
        KeyCode::Up => Some(Command::SelectPrev),
        KeyCode::Enter => Some(Command::Activate),
        KeyCode::Char('s') => Some(Command::Save),
        KeyCode::Char('e') => Some(Command::Export),
        KeyCode::Char('t') => Some(Command::CycleDocumentType),
        KeyCode::Char('o') => Some(Command::OpenFilePrompt),
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Esc => Some(Command::Cancel),
        _ => None,
    }
}

fn map_emacs(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('v') => Some(Command::NextPage),
            KeyCode::Char('n') => Some(Command::SelectNext),
            KeyCode::Char('p') => Some(Command::SelectPrev),
            KeyCode::Char('g') => Some(Command::Cancel),
            KeyCode::Char('o') => Some(Command::OpenFilePrompt),
            _ => map_default(key),
        };
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char('v') => Some(Command::PrevPage),
            KeyCode::Char('<') => Some(Command::FirstPage),
            KeyCode::Char('>') => Some(Command::LastPage),
            KeyCode::Char('g') => Some(Command::GotoPrompt),
            _ => None,
        };
    }
    map_default(key)
}
