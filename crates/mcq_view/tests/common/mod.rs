#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mcq_bridge::{
    BridgeError, CacheStore, ContentDimensions, EventHandler, EventTopic, LoopbackBridge,
    MemoryCacheStore, PlatformBridge, ResultCache, ScreenshotListing, Subscription,
};
use mcq_core::{McqOption, McqResponse, Question};
use mcq_view::{activate, ActiveView, ManualSurface, RecordingShell, ViewDeps};
use tokio::sync::watch;

/// Loopback bridge whose listing answers can be held back.
pub struct TestBridge {
    pub inner: LoopbackBridge,
    listings: AtomicUsize,
    gate: watch::Sender<bool>,
}

impl TestBridge {
    pub fn new() -> Self {
        Self {
            inner: LoopbackBridge::new(),
            listings: AtomicUsize::new(0),
            gate: watch::Sender::new(true),
        }
    }

    pub fn hold_listings(&self) {
        self.gate.send_replace(false);
    }

    pub fn release_listings(&self) {
        self.gate.send_replace(true);
    }

    pub fn listing_calls(&self) -> usize {
        self.listings.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PlatformBridge for TestBridge {
    fn subscribe(&self, topic: EventTopic, handler: EventHandler) -> Subscription {
        self.inner.subscribe(topic, handler)
    }

    async fn get_screenshots(&self) -> Result<ScreenshotListing, BridgeError> {
        self.listings.fetch_add(1, Ordering::SeqCst);
        let mut open = self.gate.subscribe();
        open.wait_for(|open| *open)
            .await
            .map_err(|_| BridgeError::Disconnected)?;
        self.inner.get_screenshots().await
    }

    async fn delete_screenshot(&self, path: &str) -> Result<(), BridgeError> {
        self.inner.delete_screenshot(path).await
    }

    fn update_content_dimensions(&self, dimensions: ContentDimensions) {
        self.inner.update_content_dimensions(dimensions);
    }
}

pub struct Harness {
    pub bridge: Arc<TestBridge>,
    pub store: Arc<dyn CacheStore>,
    pub surface: ManualSurface,
    pub shell: Arc<RecordingShell>,
}

impl Harness {
    pub fn new() -> Self {
        mcq_logging::initialize_for_tests();
        Self {
            bridge: Arc::new(TestBridge::new()),
            store: Arc::new(MemoryCacheStore::new()),
            surface: ManualSurface::new(Some(ContentDimensions {
                width: 400,
                height: 300,
            })),
            shell: Arc::new(RecordingShell::new()),
        }
    }

    pub fn cache(&self) -> ResultCache {
        ResultCache::new(self.store.clone())
    }

    pub fn activate(&self) -> ActiveView {
        activate(ViewDeps {
            bridge: self.bridge.clone(),
            cache: self.cache(),
            surface: Arc::new(self.surface.clone()),
            shell: self.shell.clone(),
            runtime: tokio::runtime::Handle::current(),
            messages: Default::default(),
        })
    }

    pub fn add_screenshots(&self, paths: &[&str]) {
        for path in paths {
            self.bridge.inner.add_screenshot(*path, format!("data:{path}"));
        }
    }
}

pub fn mirrored_paths(view: &ActiveView) -> Vec<String> {
    view.view()
        .screenshots
        .into_iter()
        .map(|screenshot| screenshot.path)
        .collect()
}

pub fn arithmetic() -> McqResponse {
    McqResponse {
        questions: vec![Question {
            prompt: "2+2?".to_string(),
            options: vec![
                McqOption {
                    label: "A".to_string(),
                    text: "3".to_string(),
                },
                McqOption {
                    label: "B".to_string(),
                    text: "4".to_string(),
                },
            ],
            correct_label: "B".to_string(),
            explanation: "basic arithmetic".to_string(),
        }],
    }
}
