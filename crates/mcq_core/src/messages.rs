use serde::{Deserialize, Serialize};

/// User-facing strings emitted by the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Progress text shown before any status update arrives.
    pub initial_progress: String,
    /// Progress text set when a start event arrives.
    pub start_progress: String,
    pub error_title: String,
    pub delete_failed_title: String,
    pub delete_failed_description: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            initial_progress: "Analyzing MCQ and generating answers...".to_string(),
            start_progress: "Analyzing MCQ question from screenshots...".to_string(),
            error_title: "MCQ Processing Failed".to_string(),
            delete_failed_title: "Error".to_string(),
            delete_failed_description: "Failed to delete screenshot".to_string(),
        }
    }
}
