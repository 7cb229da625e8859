use std::future;
use std::path::PathBuf;
use std::time::Duration;

use tokio::time;

use crate::error::AppResult;
use crate::event::DomainEvent;
use crate::ui;
use crate::viewer::{RenderWorker, RenderWorkerResult};

use super::core::App;
use super::event_bus::InputPump;
use super::terminal_session::TerminalSession;

pub(crate) enum WaitEvent {
    Event(DomainEvent),
    /// Nothing arrived before the poll timeout; the loop redraws anyway.
    Idle,
    Closed,
}

impl App {
    /// Runs the interactive viewer until the user quits.
    pub async fn run(&mut self, initial: Option<PathBuf>) -> AppResult<()> {
        let mut session = TerminalSession::enter()?;
        self.render.presenter.initialize_terminal()?;
        let mut input = InputPump::spawn(self.event_tx.clone());
        tracing::info!(presenter = %self.render.presenter.status_label(), "session started");

        self.refresh_documents();
        if let Some(path) = initial {
            self.open_file(path);
        }

        let result = self.drive(&mut session).await;
        input.shutdown();
        session.restore()?;
        tracing::info!("session ended");
        result
    }

    async fn drive(&mut self, session: &mut TerminalSession) -> AppResult<()> {
        let poll_timeout = Duration::from_millis(self.config.viewer.input_poll_timeout_ms.max(1));
        while !self.quit_requested {
            session.draw(|frame| ui::draw(frame, &self.state, self.render.presenter.as_mut()))?;
            match self.next_event(poll_timeout).await {
                WaitEvent::Event(event) => self.handle_event(event)?,
                WaitEvent::Idle => {}
                WaitEvent::Closed => break,
            }
        }
        Ok(())
    }

    pub(crate) async fn next_event(&mut self, timeout: Duration) -> WaitEvent {
        let worker = self.render.worker.as_mut();
        tokio::select! {
            maybe_event = self.event_rx.recv() => match maybe_event {
                Some(event) => WaitEvent::Event(event),
                None => WaitEvent::Closed,
            },
            Some(completed) = next_render_result(worker) => {
                WaitEvent::Event(DomainEvent::RenderComplete(completed))
            },
            _ = time::sleep(timeout) => WaitEvent::Idle,
        }
    }
}

async fn next_render_result(worker: Option<&mut RenderWorker>) -> Option<RenderWorkerResult> {
    match worker {
        Some(worker) => worker.recv_result().await,
        None => future::pending().await,
    }
}
