use std::sync::{Arc, Mutex, PoisonError};

use mcq_bridge::{ContentDimensions, Subscription};
use mcq_core::{AppView, McqViewModel, Notification};
use mcq_logging::{mcq_debug, mcq_info};

/// The application shell hosting the MCQ view.
pub trait ViewShell: Send + Sync {
    fn show_toast(&self, notification: &Notification);
    /// Navigation is owned by the shell; the view only asks for it.
    fn set_view(&self, view: AppView);
    /// Called with a fresh view model whenever something visible changed.
    ///
    /// Frames arrive in the order their state was produced; a frame that lost
    /// the race to a newer one is never delivered. Renders are serialized, so
    /// an implementation must not call back into the view from here.
    fn render(&self, _view: &McqViewModel) {}
}

pub type ResizeCallback = Box<dyn Fn(ContentDimensions) + Send + Sync>;

/// The rendered content element whose size the host window tracks.
pub trait ContentSurface: Send + Sync {
    /// `None` while nothing is laid out.
    fn measure(&self) -> Option<ContentDimensions>;
    fn observe_resize(&self, on_resize: ResizeCallback) -> Subscription;
}

/// Shell that keeps everything it is told, for headless hosts and tests.
#[derive(Debug, Default)]
pub struct RecordingShell {
    toasts: Mutex<Vec<Notification>>,
    views: Mutex<Vec<AppView>>,
    renders: Mutex<Vec<McqViewModel>>,
}

impl RecordingShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Notification> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn views(&self) -> Vec<AppView> {
        self.views
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn render_count(&self) -> usize {
        self.renders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn last_render(&self) -> Option<McqViewModel> {
        self.renders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl ViewShell for RecordingShell {
    fn show_toast(&self, notification: &Notification) {
        mcq_info!(
            "toast [{:?}] {}: {}",
            notification.variant,
            notification.title,
            notification.description
        );
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }

    fn set_view(&self, view: AppView) {
        mcq_info!("navigate to {:?}", view);
        self.views
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(view);
    }

    fn render(&self, view: &McqViewModel) {
        mcq_debug!(
            "render spinner={} questions={} screenshots={}",
            view.show_spinner,
            view.questions.len(),
            view.screenshots.len()
        );
        self.renders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(view.clone());
    }
}

/// A surface whose size is set by hand.
#[derive(Clone, Default)]
pub struct ManualSurface {
    size: Arc<Mutex<Option<ContentDimensions>>>,
    observers: Arc<Mutex<Vec<(u64, Arc<dyn Fn(ContentDimensions) + Send + Sync>)>>>,
    next_id: Arc<Mutex<u64>>,
}

impl ManualSurface {
    pub fn new(initial: Option<ContentDimensions>) -> Self {
        Self {
            size: Arc::new(Mutex::new(initial)),
            ..Self::default()
        }
    }

    /// Changes the size and notifies observers.
    pub fn resize(&self, dimensions: ContentDimensions) {
        *self.size.lock().unwrap_or_else(PoisonError::into_inner) = Some(dimensions);
        let observers: Vec<_> = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in observers {
            callback(dimensions);
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl ContentSurface for ManualSurface {
    fn measure(&self) -> Option<ContentDimensions> {
        *self.size.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn observe_resize(&self, on_resize: ResizeCallback) -> Subscription {
        let id = {
            let mut next_id = self.next_id.lock().unwrap_or_else(PoisonError::into_inner);
            *next_id += 1;
            *next_id
        };
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::from(on_resize)));
        let observers = Arc::downgrade(&self.observers);
        Subscription::new(move || {
            if let Some(observers) = observers.upgrade() {
                observers
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .retain(|(observer_id, _)| *observer_id != id);
            }
        })
    }
}
