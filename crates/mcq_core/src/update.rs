use mcq_logging::{mcq_debug, mcq_info};

use crate::{AppView, Effect, McqState, Msg, Notification};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: McqState, msg: Msg) -> (McqState, Vec<Effect>) {
    let effects = match msg {
        Msg::RestoreCached(result) => {
            state.settle(result);
            Vec::new()
        }
        Msg::ProcessingStarted => {
            let generation = state.start();
            vec![Effect::RefreshScreenshots { generation }]
        }
        Msg::ProcessingStatus(message) => {
            state.set_status(message);
            Vec::new()
        }
        Msg::ProcessingSucceeded(result) => {
            let generation = state.settle_and_refresh(result.clone());
            vec![
                Effect::WriteCache(result),
                Effect::RefreshScreenshots { generation },
            ]
        }
        Msg::ProcessingFailed(error) => {
            state.fail();
            let title = state.messages().error_title.clone();
            vec![
                Effect::Notify(Notification::error(title, error)),
                Effect::Navigate(AppView::Queue),
            ]
        }
        Msg::ResetView => {
            state.reset();
            vec![Effect::ClearCache, Effect::Navigate(AppView::Queue)]
        }
        Msg::NoScreenshots => {
            // Answer generation works from extracted text; nothing to report here.
            mcq_info!("no-screenshots event ignored in MCQ view");
            Vec::new()
        }
        Msg::ScreenshotsListed {
            generation,
            previews,
            received_at,
        } => {
            let count = previews.len();
            if !state.apply_listing(generation, previews, received_at) {
                mcq_debug!(
                    "Discarding stale screenshot listing generation={} current={} count={}",
                    generation,
                    state.screenshots().generation(),
                    count
                );
            }
            Vec::new()
        }
        Msg::ScreenshotListingFailed { generation } => {
            if !state.apply_listing_failure(generation) {
                mcq_debug!(
                    "Discarding stale screenshot listing failure generation={}",
                    generation
                );
            }
            Vec::new()
        }
        Msg::DeleteRequested { index } => match state.screenshots().get(index) {
            Some(entry) => vec![Effect::DeleteScreenshot {
                index,
                path: entry.path.clone(),
            }],
            None => {
                mcq_debug!(
                    "Delete requested for index {} but mirror holds {}",
                    index,
                    state.screenshots().len()
                );
                Vec::new()
            }
        },
        Msg::ScreenshotDeleted { index, path } => {
            if !state.remove_screenshot(index, &path) {
                mcq_debug!("Deleted screenshot {} no longer mirrored", path);
            }
            Vec::new()
        }
        Msg::ScreenshotDeleteFailed { .. } => {
            let messages = state.messages();
            vec![Effect::Notify(Notification::error(
                messages.delete_failed_title.clone(),
                messages.delete_failed_description.clone(),
            ))]
        }
    };

    (state, effects)
}
