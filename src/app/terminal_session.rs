use std::io::{self, Stdout};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::error::{AppError, AppResult};

/// Raw mode plus alternate screen for the lifetime of the interactive session.
pub(crate) struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
}

impl TerminalSession {
    pub(crate) fn enter() -> AppResult<Self> {
        enable_raw_mode()
            .map_err(|err| AppError::io_with_context(err, "failed to enable raw mode"))?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::io_with_context(err, "failed to enter alternate screen"));
        }

        let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(err) => {
                leave_screen(&mut io::stdout());
                return Err(AppError::io_with_context(err, "failed to create terminal"));
            }
        };
        if let Err(err) = terminal.clear() {
            leave_screen(terminal.backend_mut());
            return Err(AppError::io_with_context(err, "failed to clear terminal"));
        }

        Ok(Self {
            terminal,
            active: true,
        })
    }

    pub(crate) fn draw<F>(&mut self, render: F) -> AppResult<()>
    where
        F: FnOnce(&mut Frame<'_>),
    {
        self.terminal
            .draw(render)
            .map(|_| ())
            .map_err(|err| AppError::io_with_context(err, "failed to draw frame"))
    }

    pub(crate) fn restore(&mut self) -> AppResult<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()
            .map_err(|err| AppError::io_with_context(err, "failed to disable raw mode"))?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|err| AppError::io_with_context(err, "failed to leave alternate screen"))?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

fn leave_screen(out: &mut impl io::Write) {
    let _ = execute!(out, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}
