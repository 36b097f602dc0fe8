use chrono::{DateTime, Utc};

use crate::mirror::{Generation, ScreenshotMirror};
use crate::view_model::McqViewModel;
use crate::{McqResponse, Messages, ScreenshotPreview};

/// Where the answer flow currently stands.
///
/// A result only exists in `Settled`, so a frame can never show the spinner
/// next to a stale answer set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProcessingPhase {
    Idle,
    #[default]
    Processing,
    Settled(McqResponse),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McqState {
    phase: ProcessingPhase,
    message: String,
    has_started: bool,
    screenshots: ScreenshotMirror,
    messages: Messages,
    dirty: bool,
}

impl Default for McqState {
    fn default() -> Self {
        Self::new()
    }
}

impl McqState {
    /// The view is only built once the shell has decided work is underway,
    /// so it starts out processing.
    pub fn new() -> Self {
        Self::with_messages(Messages::default())
    }

    pub fn with_messages(messages: Messages) -> Self {
        Self {
            phase: ProcessingPhase::Processing,
            message: messages.initial_progress.clone(),
            has_started: true,
            screenshots: ScreenshotMirror::new(),
            messages,
            dirty: false,
        }
    }

    pub fn phase(&self) -> &ProcessingPhase {
        &self.phase
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.phase, ProcessingPhase::Processing)
    }

    pub fn result(&self) -> Option<&McqResponse> {
        match &self.phase {
            ProcessingPhase::Settled(result) => Some(result),
            ProcessingPhase::Idle | ProcessingPhase::Processing => None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    pub fn screenshots(&self) -> &ScreenshotMirror {
        &self.screenshots
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn view(&self) -> McqViewModel {
        McqViewModel::from_state(self)
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn start(&mut self) -> Generation {
        self.phase = ProcessingPhase::Processing;
        self.has_started = true;
        self.message = self.messages.start_progress.clone();
        self.mark_dirty();
        self.screenshots.begin_refresh()
    }

    pub(crate) fn set_status(&mut self, message: String) {
        self.message = message;
        if self.is_processing() {
            self.mark_dirty();
        }
    }

    pub(crate) fn settle(&mut self, result: McqResponse) {
        self.phase = ProcessingPhase::Settled(result);
        self.has_started = true;
        self.message.clear();
        self.mark_dirty();
    }

    pub(crate) fn settle_and_refresh(&mut self, result: McqResponse) -> Generation {
        self.settle(result);
        self.screenshots.begin_refresh()
    }

    pub(crate) fn fail(&mut self) {
        self.phase = ProcessingPhase::Idle;
        self.message.clear();
        self.mark_dirty();
    }

    pub(crate) fn reset(&mut self) {
        self.phase = ProcessingPhase::Idle;
        self.message.clear();
        self.has_started = false;
        self.screenshots.reset();
        self.mark_dirty();
    }

    pub(crate) fn apply_listing(
        &mut self,
        generation: Generation,
        previews: Vec<ScreenshotPreview>,
        received_at: DateTime<Utc>,
    ) -> bool {
        let applied = self
            .screenshots
            .apply_listing(generation, previews, received_at);
        if applied {
            self.mark_dirty();
        }
        applied
    }

    pub(crate) fn apply_listing_failure(&mut self, generation: Generation) -> bool {
        let applied = self.screenshots.apply_listing_failure(generation);
        if applied {
            self.mark_dirty();
        }
        applied
    }

    pub(crate) fn remove_screenshot(&mut self, index: usize, path: &str) -> bool {
        let removed = self.screenshots.remove_confirmed(index, path);
        if removed {
            self.mark_dirty();
        }
        removed
    }
}
