use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

use crate::backend::{PageViewport, PdfEngine, RgbaFrame};
use crate::error::{AppError, AppResult};

use super::cache::RenderedPageKey;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTask {
    pub key: RenderedPageKey,
    pub viewport: PageViewport,
}

enum RenderWorkerRequest {
    Task { task_id: u64, task: RenderTask },
    Shutdown,
}

#[derive(Debug)]
pub struct RenderResultEvent {
    pub(crate) task_id: u64,
    pub(crate) key: RenderedPageKey,
    pub(crate) result: AppResult<RgbaFrame>,
    pub(crate) elapsed: Duration,
}

#[derive(Debug)]
pub struct RenderWorkerResult {
    pub key: RenderedPageKey,
    pub result: AppResult<RgbaFrame>,
    pub elapsed: Duration,
}

struct RenderWorkerRuntime {
    _owned: Option<Runtime>,
    handle: Handle,
}

impl RenderWorkerRuntime {
    fn new() -> AppResult<Self> {
        if let Ok(handle) = Handle::try_current() {
            return Ok(Self {
                _owned: None,
                handle,
            });
        }

        let runtime = Builder::new_multi_thread()
            .enable_all()
            .thread_name("pdfx-render")
            .build()
            .map_err(|source| AppError::io_with_context(source, "failed to start render runtime"))?;
        let handle = runtime.handle().clone();
        Ok(Self {
            _owned: Some(runtime),
            handle,
        })
    }
}

/// Pool of blocking threads rasterizing pages of one upload. Each thread opens its own
/// document handle from the shared bytes.
pub struct RenderWorker {
    load_id: u64,
    request_tx: UnboundedSender<RenderWorkerRequest>,
    result_rx: UnboundedReceiver<RenderResultEvent>,
    in_flight: HashMap<RenderedPageKey, u64>,
    _runtime: RenderWorkerRuntime,
    workers: Vec<JoinHandle<()>>,
    worker_threads: usize,
    next_task_id: u64,
}

impl RenderWorker {
    pub fn spawn(
        engine: Arc<dyn PdfEngine>,
        bytes: Arc<Vec<u8>>,
        load_id: u64,
        worker_threads: usize,
    ) -> AppResult<Self> {
        let (request_tx, request_rx) = unbounded_channel();
        let (result_tx, result_rx) = unbounded_channel();
        let runtime = RenderWorkerRuntime::new()?;
        let worker_threads = worker_threads.max(1);
        let request_rx = Arc::new(Mutex::new(request_rx));

        let mut workers = Vec::with_capacity(worker_threads);
        for _ in 0..worker_threads {
            let engine = Arc::clone(&engine);
            let bytes = Arc::clone(&bytes);
            let request_rx = Arc::clone(&request_rx);
            let result_tx = result_tx.clone();
            workers.push(
                runtime
                    .handle
                    .spawn_blocking(move || render_worker_main(engine, bytes, request_rx, result_tx)),
            );
        }
        tracing::debug!(load_id, worker_threads, "render workers started");

        Ok(Self {
            load_id,
            request_tx,
            result_rx,
            in_flight: HashMap::new(),
            _runtime: runtime,
            workers,
            worker_threads,
            next_task_id: 1,
        })
    }

    /// Returns false when the same page and scale is already being rendered.
    pub fn enqueue(&mut self, task: RenderTask) -> bool {
        if task.key.load_id != self.load_id || self.in_flight.contains_key(&task.key) {
            return false;
        }
        let task_id = self.next_task_id;
        self.next_task_id = self.next_task_id.saturating_add(1);

        let key = task.key;
        if self
            .request_tx
            .send(RenderWorkerRequest::Task { task_id, task })
            .is_err()
        {
            return false;
        }
        self.in_flight.insert(key, task_id);
        true
    }

    pub fn has_in_flight(&self, key: &RenderedPageKey) -> bool {
        self.in_flight.contains_key(key)
    }

    pub fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }

    pub(crate) fn accept_result_event(
        &mut self,
        event: RenderResultEvent,
    ) -> Option<RenderWorkerResult> {
        match self.in_flight.get(&event.key) {
            Some(task_id) if *task_id == event.task_id => {
                self.in_flight.remove(&event.key);
            }
            _ => return None,
        }
        Some(RenderWorkerResult {
            key: event.key,
            result: event.result,
            elapsed: event.elapsed,
        })
    }

    pub(crate) async fn recv_result_event(&mut self) -> Option<RenderResultEvent> {
        self.result_rx.recv().await
    }

    pub async fn recv_result(&mut self) -> Option<RenderWorkerResult> {
        while let Some(event) = self.recv_result_event().await {
            if let Some(result) = self.accept_result_event(event) {
                return Some(result);
            }
        }
        None
    }

    fn shutdown(&mut self) {
        for _ in 0..self.worker_threads {
            let _ = self.request_tx.send(RenderWorkerRequest::Shutdown);
        }
        while let Some(worker) = self.workers.pop() {
            worker.abort();
        }
    }
}

impl Drop for RenderWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn render_worker_main(
    engine: Arc<dyn PdfEngine>,
    bytes: Arc<Vec<u8>>,
    request_rx: Arc<Mutex<UnboundedReceiver<RenderWorkerRequest>>>,
    result_tx: UnboundedSender<RenderResultEvent>,
) {
    let doc = engine.open_document(bytes);
    loop {
        let request = match request_rx.lock() {
            Ok(mut request_rx) => request_rx.blocking_recv(),
            Err(_) => None,
        };
        let Some(RenderWorkerRequest::Task { task_id, task }) = request else {
            break;
        };

        let started = Instant::now();
        let page_index = task.key.page.saturating_sub(1);
        let result = match &doc {
            Ok(doc) => doc
                .render_page(page_index, &task.viewport)
                .map_err(|err| AppError::pdf_render(task.key.page, err)),
            Err(err) => Err(AppError::unsupported(format!(
                "render worker failed to open document: {err}"
            ))),
        };

        let event = RenderResultEvent {
            task_id,
            key: task.key,
            result,
            elapsed: started.elapsed(),
        };
        if result_tx.send(event).is_err() {
            break;
        }
    }
}
