//! MCQ bridge: the platform boundary, subscription guards and cache stores.
mod bridge;
mod cache;
mod listing;
mod loopback;
mod subscription;
mod types;

pub use bridge::PlatformBridge;
pub use cache::{
    CacheError, CacheStore, FileCacheStore, MemoryCacheStore, ResultCache, RESULT_CACHE_KEY,
};
pub use listing::ScreenshotListing;
pub use loopback::LoopbackBridge;
pub use subscription::{EventHandler, SubscriberRegistry, Subscription};
pub use types::{BridgeError, ContentDimensions, EventTopic, PlatformEvent};
