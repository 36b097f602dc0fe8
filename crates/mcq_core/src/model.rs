use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One answer choice of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqOption {
    /// "A", "B", ... or "1", "2", ...
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<McqOption>,
    #[serde(rename = "correctAnswer")]
    pub correct_label: String,
    pub explanation: String,
}

/// A successfully produced answer set. Replaced wholesale, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct McqResponse {
    pub questions: Vec<Question>,
}

impl McqResponse {
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// A screenshot entry as reported by the platform, before it is stamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenshotPreview {
    pub path: String,
    #[serde(default)]
    pub preview: String,
}

/// A mirrored screenshot. The identifier is the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotRef {
    pub id: String,
    pub path: String,
    pub preview: String,
    pub captured_at: DateTime<Utc>,
}

impl ScreenshotRef {
    pub fn from_preview(preview: ScreenshotPreview, captured_at: DateTime<Utc>) -> Self {
        Self {
            id: preview.path.clone(),
            path: preview.path,
            preview: preview.preview,
            captured_at,
        }
    }
}
