/// User intents produced by the keymap and by prompt submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    GotoPage(usize),
    ZoomIn,
    ZoomOut,
    ResetZoom,
    FocusNext,
    FocusPrev,
    SelectNext,
    SelectPrev,
    /// Edit the selected field or open the selected saved document.
    Activate,
    Save,
    Export,
    CycleDocumentType,
    OpenFilePrompt,
    GotoPrompt,
    Cancel,
    Quit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NextPage => "next-page",
            Self::PrevPage => "prev-page",
            Self::FirstPage => "first-page",
            Self::LastPage => "last-page",
            Self::GotoPage(_) => "goto-page",
            Self::ZoomIn => "zoom-in",
            Self::ZoomOut => "zoom-out",
            Self::ResetZoom => "zoom-reset",
            Self::FocusNext => "focus-next",
            Self::FocusPrev => "focus-prev",
            Self::SelectNext => "select-next",
            Self::SelectPrev => "select-prev",
            Self::Activate => "activate",
            Self::Save => "save",
            Self::Export => "export",
            Self::CycleDocumentType => "cycle-document-type",
            Self::OpenFilePrompt => "open-file",
            Self::GotoPrompt => "goto-prompt",
            Self::Cancel => "cancel",
            Self::Quit => "quit",
        }
    }
}

/// Parses the text of the go-to prompt. Pages are 1-based.
pub fn parse_goto(input: &str) -> Option<Command> {
    input.trim().parse::<usize>().ok().map(Command::GotoPage)
}

#[cfg(test)]
mod tests {
    use super::{Command, parse_goto};

    #[test]
    fn parse_goto_accepts_page_numbers_only() {
        assert_eq!(parse_goto(" 12 "), Some(Command::GotoPage(12)));
        assert_eq!(parse_goto("0"), Some(Command::GotoPage(0)));
        assert_eq!(parse_goto("-1"), None);
        assert_eq!(parse_goto("two"), None);
        assert_eq!(parse_goto(""), None);
    }
}
