use std::sync::{Arc, Weak};

use chrono::Utc;
use mcq_bridge::{PlatformBridge, ResultCache};
use mcq_core::{Effect, Msg};
use mcq_logging::mcq_warn;
use tokio::runtime::Handle;
use tokio_util::task::TaskTracker;

use super::shell::ViewShell;
use super::view::{deliver, Dispatcher};

/// Executes the effects produced by `update`.
///
/// Synchronous effects run inline. Platform queries run as tracked tasks that
/// only keep a weak reference to the view, so their answers are dropped once
/// the view is gone.
pub(crate) struct EffectRunner {
    bridge: Arc<dyn PlatformBridge>,
    cache: ResultCache,
    shell: Arc<dyn ViewShell>,
    runtime: Handle,
    tasks: TaskTracker,
}

impl EffectRunner {
    pub(crate) fn new(
        bridge: Arc<dyn PlatformBridge>,
        cache: ResultCache,
        shell: Arc<dyn ViewShell>,
        runtime: Handle,
    ) -> Self {
        Self {
            bridge,
            cache,
            shell,
            runtime,
            tasks: TaskTracker::new(),
        }
    }

    pub(crate) fn tasks(&self) -> &TaskTracker {
        &self.tasks
    }

    pub(crate) fn run(&self, dispatcher: &Arc<Dispatcher>, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RefreshScreenshots { generation } => {
                    let bridge = self.bridge.clone();
                    let view = Arc::downgrade(dispatcher);
                    self.spawn(view, async move {
                        match bridge.get_screenshots().await {
                            Ok(listing) => Msg::ScreenshotsListed {
                                generation,
                                previews: listing.into_previews(),
                                received_at: Utc::now(),
                            },
                            Err(err) => {
                                mcq_warn!("Error loading screenshots: {}", err);
                                Msg::ScreenshotListingFailed { generation }
                            }
                        }
                    });
                }
                Effect::DeleteScreenshot { index, path } => {
                    let bridge = self.bridge.clone();
                    let view = Arc::downgrade(dispatcher);
                    self.spawn(view, async move {
                        match bridge.delete_screenshot(&path).await {
                            Ok(()) => Msg::ScreenshotDeleted { index, path },
                            Err(err) => {
                                mcq_warn!("Error deleting screenshot {}: {}", path, err);
                                Msg::ScreenshotDeleteFailed { index, path }
                            }
                        }
                    });
                }
                Effect::WriteCache(result) => self.cache.write(&result),
                Effect::ClearCache => self.cache.clear(),
                Effect::Notify(notification) => self.shell.show_toast(&notification),
                Effect::Navigate(view) => self.shell.set_view(view),
            }
        }
    }

    fn spawn<F>(&self, view: Weak<Dispatcher>, request: F)
    where
        F: std::future::Future<Output = Msg> + Send + 'static,
    {
        self.tasks.spawn_on(
            async move {
                let msg = request.await;
                deliver(&view, msg);
            },
            &self.runtime,
        );
    }
}
