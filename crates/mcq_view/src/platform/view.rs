use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use mcq_bridge::{
    ContentDimensions, EventTopic, PlatformBridge, PlatformEvent, ResultCache, Subscription,
};
use mcq_core::{update, McqState, McqViewModel, Messages, Msg};
use mcq_logging::{mcq_debug, mcq_trace, mcq_warn};
use tokio::runtime::Handle;
use tokio_util::task::TaskTracker;

use super::effects::EffectRunner;
use super::shell::{ContentSurface, ViewShell};

/// Collaborators the MCQ view needs while it is active.
pub struct ViewDeps {
    pub bridge: Arc<dyn PlatformBridge>,
    pub cache: ResultCache,
    pub surface: Arc<dyn ContentSurface>,
    pub shell: Arc<dyn ViewShell>,
    pub runtime: Handle,
    pub messages: Messages,
}

/// Owns the state and serializes every handler invocation.
pub(crate) struct Dispatcher {
    state: Mutex<McqState>,
    shell: Arc<dyn ViewShell>,
    effects: EffectRunner,
    active: AtomicBool,
    /// Sequence of the next view model, assigned under the state lock.
    next_frame: AtomicU64,
    /// Sequence of the last view model handed to the shell.
    rendered: Mutex<u64>,
}

/// A view model tagged with the order in which its state was produced.
struct Frame {
    seq: u64,
    view: McqViewModel,
}

impl Dispatcher {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn snapshot(&self) -> McqState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn frame(&self, state: &McqState) -> Frame {
        Frame {
            seq: self.next_frame.fetch_add(1, Ordering::SeqCst) + 1,
            view: state.view(),
        }
    }

    /// Renders `frame` unless a frame built from newer state was already shown.
    fn present(&self, frame: Frame) {
        let mut rendered = self.rendered.lock().unwrap_or_else(PoisonError::into_inner);
        if frame.seq <= *rendered {
            mcq_trace!("Skipping frame {} behind rendered {}", frame.seq, *rendered);
            return;
        }
        self.shell.render(&frame.view);
        *rendered = frame.seq;
    }

    fn render_current(&self) {
        let frame = {
            let guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            self.frame(&guard)
        };
        self.present(frame);
    }

    pub(crate) fn dispatch(self: &Arc<Self>, msg: Msg) {
        let (effects, frame) = {
            let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let state = std::mem::take(&mut *guard);
            let (mut state, effects) = update(state, msg);
            let frame = state.consume_dirty().then(|| self.frame(&state));
            *guard = state;
            (effects, frame)
        };

        // Effects may call back into the view, so never hold the state lock here.
        if let Some(frame) = frame {
            self.present(frame);
        }
        self.effects.run(self, effects);
    }
}

/// Hands an asynchronously produced message to the view, unless it was
/// deactivated in the meantime.
pub(crate) fn deliver(view: &Weak<Dispatcher>, msg: Msg) {
    match view.upgrade() {
        Some(dispatcher) if dispatcher.is_active() => dispatcher.dispatch(msg),
        _ => mcq_debug!("MCQ view inactive; dropping {:?}", msg_kind(&msg)),
    }
}

fn msg_kind(msg: &Msg) -> &'static str {
    match msg {
        Msg::RestoreCached(_) => "RestoreCached",
        Msg::ProcessingStarted => "ProcessingStarted",
        Msg::ProcessingStatus(_) => "ProcessingStatus",
        Msg::ProcessingSucceeded(_) => "ProcessingSucceeded",
        Msg::ProcessingFailed(_) => "ProcessingFailed",
        Msg::ResetView => "ResetView",
        Msg::NoScreenshots => "NoScreenshots",
        Msg::ScreenshotsListed { .. } => "ScreenshotsListed",
        Msg::ScreenshotListingFailed { .. } => "ScreenshotListingFailed",
        Msg::DeleteRequested { .. } => "DeleteRequested",
        Msg::ScreenshotDeleted { .. } => "ScreenshotDeleted",
        Msg::ScreenshotDeleteFailed { .. } => "ScreenshotDeleteFailed",
    }
}

fn event_to_msg(event: PlatformEvent) -> Msg {
    match event {
        PlatformEvent::Start => Msg::ProcessingStarted,
        PlatformEvent::Status { message, progress } => {
            mcq_trace!("processing status {:.0}%: {}", progress, message);
            Msg::ProcessingStatus(message)
        }
        PlatformEvent::Success(result) => Msg::ProcessingSucceeded(result),
        PlatformEvent::Error(message) => Msg::ProcessingFailed(message),
        PlatformEvent::Reset => Msg::ResetView,
        PlatformEvent::NoScreenshots => Msg::NoScreenshots,
    }
}

/// Forwards content size changes to the host, skipping repeats.
#[derive(Clone)]
struct DimensionReporter {
    bridge: Arc<dyn PlatformBridge>,
    last: Arc<Mutex<Option<ContentDimensions>>>,
}

impl DimensionReporter {
    fn report(&self, dimensions: ContentDimensions) {
        {
            let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
            if *last == Some(dimensions) {
                return;
            }
            *last = Some(dimensions);
        }
        self.bridge.update_content_dimensions(dimensions);
    }
}

/// Activates the MCQ view: recovers any cached result, starts reporting the
/// content size and subscribes to every lifecycle event. Everything acquired
/// here is released when the returned handle is dropped.
pub fn activate(deps: ViewDeps) -> ActiveView {
    let ViewDeps {
        bridge,
        cache,
        surface,
        shell,
        runtime,
        messages,
    } = deps;

    let cached = cache.read();
    let dispatcher = Arc::new(Dispatcher {
        state: Mutex::new(McqState::with_messages(messages)),
        shell: shell.clone(),
        effects: EffectRunner::new(bridge.clone(), cache, shell.clone(), runtime),
        active: AtomicBool::new(true),
        next_frame: AtomicU64::new(0),
        rendered: Mutex::new(0),
    });
    match cached {
        Some(result) => dispatcher.dispatch(Msg::RestoreCached(result)),
        None => dispatcher.render_current(),
    }

    let reporter = DimensionReporter {
        bridge: bridge.clone(),
        last: Arc::new(Mutex::new(None)),
    };
    if let Some(dimensions) = surface.measure() {
        reporter.report(dimensions);
    }
    let observer = surface.observe_resize(Box::new(move |dimensions| reporter.report(dimensions)));

    let subscriptions = EventTopic::ALL
        .into_iter()
        .map(|topic| {
            let view = Arc::downgrade(&dispatcher);
            bridge.subscribe(
                topic,
                Box::new(move |event: PlatformEvent| {
                    if event.topic() != topic {
                        mcq_warn!(
                            "Ignoring {} event delivered on {} subscription",
                            event.topic(),
                            topic
                        );
                        return;
                    }
                    deliver(&view, event_to_msg(event));
                }),
            )
        })
        .collect();

    mcq_debug!("MCQ view activated");
    ActiveView {
        dispatcher,
        observer: Some(observer),
        subscriptions,
    }
}

/// Dispose handle of an activated view.
pub struct ActiveView {
    dispatcher: Arc<Dispatcher>,
    observer: Option<Subscription>,
    subscriptions: Vec<Subscription>,
}

impl ActiveView {
    pub fn view(&self) -> McqViewModel {
        self.dispatcher.snapshot().view()
    }

    pub fn state(&self) -> McqState {
        self.dispatcher.snapshot()
    }

    /// User asked to delete the screenshot at `index` of the mirror.
    pub fn delete_screenshot(&self, index: usize) {
        self.dispatcher.dispatch(Msg::DeleteRequested { index });
    }

    /// Tracker of the platform requests this view has in flight.
    pub fn tasks(&self) -> TaskTracker {
        self.dispatcher.effects.tasks().clone()
    }

    /// Waits until no platform request is in flight.
    pub async fn settled(&self) {
        let tasks = self.dispatcher.effects.tasks();
        while !tasks.is_empty() {
            tasks.close();
            tasks.wait().await;
            tasks.reopen();
        }
    }

    pub fn deactivate(self) {}
}

impl Drop for ActiveView {
    fn drop(&mut self) {
        self.dispatcher.active.store(false, Ordering::SeqCst);
        self.observer.take();
        self.subscriptions.clear();
        mcq_debug!("MCQ view deactivated");
    }
}
