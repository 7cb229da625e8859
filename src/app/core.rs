use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::backend::{PdfEngine, default_engine};
use crate::config::Config;
use crate::event::DomainEvent;
use crate::fields::{FieldExtractor, PlaceholderExtractor};
use crate::input::KeymapPreset;
use crate::presenter::{ImagePresenter, RatatuiImagePresenter};
use crate::store::DocumentStore;
use crate::viewer::{RenderWorker, RenderedPageCache, RenderedPageKey};

use super::state::AppState;

/// The document currently on screen. Replaced wholesale by each successful upload.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub load_id: u64,
    pub bytes: Arc<Vec<u8>>,
    pub page_sizes: Vec<(f32, f32)>,
}

pub struct RenderSubsystem {
    pub presenter: Box<dyn ImagePresenter>,
    pub cache: RenderedPageCache,
    pub worker: Option<RenderWorker>,
    /// Renders that failed since the last navigation; only a user action queues them again.
    pub failed: HashSet<RenderedPageKey>,
}

pub struct AppComponents {
    pub engine: Arc<dyn PdfEngine>,
    pub store: Arc<dyn DocumentStore>,
    pub extractor: Arc<dyn FieldExtractor>,
    pub presenter: Box<dyn ImagePresenter>,
}

impl AppComponents {
    pub fn standard(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            engine: default_engine(),
            store,
            extractor: Arc::new(PlaceholderExtractor),
            presenter: Box::new(RatatuiImagePresenter::new()),
        }
    }
}

pub struct App {
    pub state: AppState,
    pub config: Config,
    pub render: RenderSubsystem,
    pub(crate) engine: Arc<dyn PdfEngine>,
    pub(crate) store: Arc<dyn DocumentStore>,
    pub(crate) extractor: Arc<dyn FieldExtractor>,
    pub(crate) document: Option<LoadedDocument>,
    pub(crate) keymap: KeymapPreset,
    /// Id of the most recent upload; completions carrying an older id are ignored.
    pub(crate) latest_load_id: u64,
    pub(crate) documents_epoch: u64,
    pub(crate) applied_documents_epoch: u64,
    pub(crate) quit_requested: bool,
    pub(crate) event_tx: UnboundedSender<DomainEvent>,
    pub(crate) event_rx: UnboundedReceiver<DomainEvent>,
}

impl App {
    pub fn new(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        Self::with_components(config, AppComponents::standard(store))
    }

    pub fn with_components(config: Config, components: AppComponents) -> Self {
        let (event_tx, event_rx) = unbounded_channel();
        let cache = RenderedPageCache::new(
            config.cache.max_entries,
            config.cache.memory_budget_bytes(),
        );
        let keymap = KeymapPreset::parse(&config.keymap.preset);

        Self {
            state: AppState::default(),
            render: RenderSubsystem {
                presenter: components.presenter,
                cache,
                worker: None,
                failed: HashSet::new(),
            },
            engine: components.engine,
            store: components.store,
            extractor: components.extractor,
            document: None,
            keymap,
            latest_load_id: 0,
            documents_epoch: 0,
            applied_documents_epoch: 0,
            quit_requested: false,
            event_tx,
            event_rx,
            config,
        }
    }

    pub fn document(&self) -> Option<&LoadedDocument> {
        self.document.as_ref()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}
