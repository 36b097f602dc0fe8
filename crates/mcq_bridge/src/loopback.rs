use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use mcq_core::ScreenshotPreview;
use mcq_logging::mcq_debug;

use crate::{
    BridgeError, ContentDimensions, EventHandler, EventTopic, PlatformBridge, PlatformEvent,
    ScreenshotListing, SubscriberRegistry, Subscription,
};

/// In-process bridge: the host side lives in the same process and drives
/// the view through [`LoopbackBridge::emit`].
#[derive(Default)]
pub struct LoopbackBridge {
    registry: SubscriberRegistry,
    screenshots: Mutex<Vec<ScreenshotPreview>>,
    envelope_listings: AtomicBool,
    listing_failure: Mutex<Option<BridgeError>>,
    failing_deletes: Mutex<HashSet<String>>,
    dimensions: Mutex<Vec<ContentDimensions>>,
}

impl LoopbackBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `event` to the subscribers of its topic.
    pub fn emit(&self, event: PlatformEvent) -> usize {
        mcq_debug!("loopback emit {}", event.topic());
        self.registry.emit(event)
    }

    pub fn add_screenshot(&self, path: impl Into<String>, preview: impl Into<String>) {
        self.screenshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ScreenshotPreview {
                path: path.into(),
                preview: preview.into(),
            });
    }

    pub fn screenshots(&self) -> Vec<ScreenshotPreview> {
        self.screenshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Answer listings with the `{previews: [...]}` shape instead of a bare array.
    pub fn respond_with_envelope(&self, enabled: bool) {
        self.envelope_listings.store(enabled, Ordering::SeqCst);
    }

    pub fn fail_listings(&self, failure: Option<BridgeError>) {
        *self
            .listing_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = failure;
    }

    pub fn fail_delete_of(&self, path: impl Into<String>) {
        self.failing_deletes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into());
    }

    pub fn reported_dimensions(&self) -> Vec<ContentDimensions> {
        self.dimensions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn subscriber_count(&self, topic: EventTopic) -> usize {
        self.registry.subscriber_count(topic)
    }

    pub fn total_subscribers(&self) -> usize {
        self.registry.total_subscribers()
    }
}

#[async_trait::async_trait]
impl PlatformBridge for LoopbackBridge {
    fn subscribe(&self, topic: EventTopic, handler: EventHandler) -> Subscription {
        self.registry.subscribe(topic, handler)
    }

    async fn get_screenshots(&self) -> Result<ScreenshotListing, BridgeError> {
        if let Some(failure) = self
            .listing_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(failure);
        }
        let previews = self.screenshots();
        if self.envelope_listings.load(Ordering::SeqCst) {
            Ok(ScreenshotListing::Envelope {
                previews: Some(previews),
            })
        } else {
            Ok(ScreenshotListing::Bare(previews))
        }
    }

    async fn delete_screenshot(&self, path: &str) -> Result<(), BridgeError> {
        if self
            .failing_deletes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(path)
        {
            return Err(BridgeError::Rejected(format!("cannot delete {path}")));
        }
        let mut screenshots = self.screenshots.lock().unwrap_or_else(PoisonError::into_inner);
        match screenshots.iter().position(|entry| entry.path == path) {
            Some(position) => {
                screenshots.remove(position);
                Ok(())
            }
            None => Err(BridgeError::Rejected(format!("no screenshot at {path}"))),
        }
    }

    fn update_content_dimensions(&self, dimensions: ContentDimensions) {
        self.dimensions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(dimensions);
    }
}
