mod save_flow;

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tempfile::TempDir;

use crate::config::Config;
use crate::fields::PlaceholderExtractor;
use crate::store::{DocumentStore, MemoryStore};
use crate::test_support::{FakeBackend, FakeEngine, RecordingPresenter};
use crate::viewer::RenderedPageKey;

use super::core::{App, AppComponents};
use super::event_loop::WaitEvent;

const PUMP_DEADLINE: Duration = Duration::from_secs(5);
const PUMP_POLL: Duration = Duration::from_millis(10);

struct Harness {
    app: App,
    dir: TempDir,
    shows: Arc<Mutex<Vec<RenderedPageKey>>>,
}

impl Harness {
    fn new(backend: FakeBackend) -> (Self, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let harness = Self::with_store(backend, store.clone());
        (harness, store)
    }

    fn with_store(backend: FakeBackend, store: Arc<dyn DocumentStore>) -> Self {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let mut config = Config::default();
        config.export.directory = dir.path().to_path_buf();
        config.notifications.dismiss_after_ms = 60_000;

        let presenter = RecordingPresenter::default();
        let shows = Arc::clone(&presenter.shows);
        let app = App::with_components(
            config,
            AppComponents {
                engine: Arc::new(FakeEngine::new(backend)),
                store,
                extractor: Arc::new(PlaceholderExtractor),
                presenter: Box::new(presenter),
            },
        );
        Self { app, dir, shows }
    }

    fn write_file(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, bytes).expect("test file should be written");
        path
    }

    fn pdf(&self, name: &str) -> PathBuf {
        self.write_file(name, b"%PDF-1.4 fake")
    }

    /// Handles events until `done` holds, failing the test after a deadline.
    async fn pump_until(&mut self, done: impl Fn(&App) -> bool) {
        let app = &mut self.app;
        tokio::time::timeout(PUMP_DEADLINE, async {
            while !done(app) {
                match app.next_event(PUMP_POLL).await {
                    WaitEvent::Event(event) => {
                        app.handle_event(event).expect("event should be handled");
                    }
                    WaitEvent::Idle => {}
                    WaitEvent::Closed => panic!("event channel closed"),
                }
            }
        })
        .await
        .expect("condition should be reached before the deadline");
    }

    async fn open_and_settle(&mut self, name: &str) {
        let path = self.pdf(name);
        self.app.open_file(path);
        self.pump_until(|app| !app.state.loading && !app.state.text.is_empty())
            .await;
        self.pump_until(|app| app.render.presenter.shown_key() == app.current_render_key())
            .await;
    }

    fn shown(&self) -> Vec<RenderedPageKey> {
        self.shows.lock().expect("shows lock").clone()
    }

    fn key(&self, page: usize, scale: f32) -> RenderedPageKey {
        let load_id = self.app.document().expect("document should be loaded").load_id;
        RenderedPageKey::new(load_id, page, scale)
    }
}
