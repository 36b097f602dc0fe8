use chrono::{DateTime, Utc};

use crate::{Generation, McqResponse, ScreenshotPreview};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A result recovered from the cache slot at activation.
    RestoreCached(McqResponse),
    /// Platform: processing began.
    ProcessingStarted,
    /// Platform: progress text update.
    ProcessingStatus(String),
    /// Platform: processing produced a result.
    ProcessingSucceeded(McqResponse),
    /// Platform: processing failed with the given message.
    ProcessingFailed(String),
    /// Platform: the view must be reset.
    ResetView,
    /// Platform: no screenshots were available. Ignored in this view.
    NoScreenshots,
    /// A screenshot listing request completed.
    ScreenshotsListed {
        generation: Generation,
        previews: Vec<ScreenshotPreview>,
        received_at: DateTime<Utc>,
    },
    /// A screenshot listing request failed.
    ScreenshotListingFailed { generation: Generation },
    /// User asked to delete the screenshot at `index`.
    DeleteRequested { index: usize },
    /// The platform confirmed a deletion.
    ScreenshotDeleted { index: usize, path: String },
    /// The platform rejected a deletion.
    ScreenshotDeleteFailed { index: usize, path: String },
}
