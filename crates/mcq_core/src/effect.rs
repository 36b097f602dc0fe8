use crate::{Generation, McqResponse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Query the platform for its screenshot list; the answer must be
    /// dispatched back tagged with `generation`.
    RefreshScreenshots { generation: Generation },
    DeleteScreenshot { index: usize, path: String },
    WriteCache(McqResponse),
    ClearCache,
    Notify(Notification),
    /// Ask the surrounding shell to switch views.
    Navigate(AppView),
}

/// Views of the host shell. The MCQ view itself only ever leaves for
/// `Queue`; the rest exist so a shell can map every one of its views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Queue,
    Solutions,
    Debug,
    Mcq,
}

/// Toast styles of the host shell. Failures from this view use `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationVariant {
    Neutral,
    Success,
    Error,
}

/// A transient, non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Error,
        }
    }
}
