use crossterm::event::EventStream;
use futures_util::StreamExt;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::event::DomainEvent;

/// Forwards terminal input into the app's event channel until shut down.
pub(crate) struct InputPump {
    task: Option<JoinHandle<()>>,
}

impl InputPump {
    pub(crate) fn spawn(tx: UnboundedSender<DomainEvent>) -> Self {
        let task = tokio::spawn(async move {
            let mut input_stream = EventStream::new();
            while let Some(event) = input_stream.next().await {
                let forwarded = match event {
                    Ok(event) => DomainEvent::Input(event),
                    Err(err) => DomainEvent::InputError(err.to_string()),
                };
                if tx.send(forwarded).is_err() {
                    return;
                }
            }
        });
        Self { task: Some(task) }
    }

    pub(crate) fn shutdown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        self.shutdown();
    }
}
