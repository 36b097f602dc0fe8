use mcq_core::ScreenshotPreview;
use mcq_logging::mcq_warn;
use serde::{Deserialize, Serialize};

/// A screenshot listing as the platform may return it: either a bare array
/// or an object carrying the array under `previews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScreenshotListing {
    Bare(Vec<ScreenshotPreview>),
    Envelope {
        #[serde(default)]
        previews: Option<Vec<ScreenshotPreview>>,
    },
}

impl Default for ScreenshotListing {
    fn default() -> Self {
        ScreenshotListing::Bare(Vec::new())
    }
}

impl ScreenshotListing {
    /// Normalizes an untrusted JSON response. Any shape other than the two
    /// accepted ones becomes an empty listing.
    pub fn from_value(value: serde_json::Value) -> Self {
        match serde_json::from_value(value) {
            Ok(listing) => listing,
            Err(err) => {
                mcq_warn!("Unexpected screenshot listing shape, treating as empty: {}", err);
                Self::default()
            }
        }
    }

    pub fn into_previews(self) -> Vec<ScreenshotPreview> {
        match self {
            ScreenshotListing::Bare(previews) => previews,
            ScreenshotListing::Envelope { previews } => previews.unwrap_or_default(),
        }
    }
}
