mod core;
mod document_ops;
mod event_bus;
mod event_loop;
mod input_ops;
mod render_ops;
mod save_ops;
mod state;
mod terminal_session;

#[cfg(test)]
mod tests;

pub use core::{App, AppComponents, LoadedDocument, RenderSubsystem};
pub use state::{AppState, Mode, Pane, PromptKind};
