use crate::{BridgeError, ContentDimensions, EventHandler, EventTopic, ScreenshotListing, Subscription};

/// The host process as seen from the MCQ view.
#[async_trait::async_trait]
pub trait PlatformBridge: Send + Sync {
    /// Registers `handler` for `topic`. Dropping the returned guard unsubscribes.
    fn subscribe(&self, topic: EventTopic, handler: EventHandler) -> Subscription;

    async fn get_screenshots(&self) -> Result<ScreenshotListing, BridgeError>;

    async fn delete_screenshot(&self, path: &str) -> Result<(), BridgeError>;

    /// Fire-and-forget.
    fn update_content_dimensions(&self, dimensions: ContentDimensions);
}
