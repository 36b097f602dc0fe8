use std::sync::{Arc, Mutex, PoisonError};

use crate::{EventTopic, PlatformEvent};

pub type EventHandler = Box<dyn Fn(PlatformEvent) + Send + Sync>;

/// Guard for a registered callback. Dropping it unregisters the callback,
/// exactly once.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release.
    pub fn detached() -> Self {
        Self { release: None }
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

type SharedHandler = Arc<dyn Fn(PlatformEvent) + Send + Sync>;

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    handlers: Vec<(u64, EventTopic, SharedHandler)>,
}

/// Topic-keyed fan-out list that bridge implementations can build on.
#[derive(Clone, Default)]
pub struct SubscriberRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, topic: EventTopic, handler: EventHandler) -> Subscription {
        let id = {
            let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.next_id += 1;
            let id = inner.next_id;
            inner.handlers.push((id, topic, Arc::from(handler)));
            id
        };
        let weak = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .handlers
                    .retain(|(handler_id, _, _)| *handler_id != id);
            }
        })
    }

    /// Delivers `event` to every handler of its topic, in subscription
    /// order. Returns how many handlers ran.
    pub fn emit(&self, event: PlatformEvent) -> usize {
        let topic = event.topic();
        // Handlers may subscribe or unsubscribe, so call them unlocked.
        let targets: Vec<SharedHandler> = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .handlers
            .iter()
            .filter(|(_, handler_topic, _)| *handler_topic == topic)
            .map(|(_, _, handler)| handler.clone())
            .collect();
        for handler in &targets {
            handler(event.clone());
        }
        targets.len()
    }

    pub fn subscriber_count(&self, topic: EventTopic) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .handlers
            .iter()
            .filter(|(_, handler_topic, _)| *handler_topic == topic)
            .count()
    }

    pub fn total_subscribers(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .handlers
            .len()
    }
}
