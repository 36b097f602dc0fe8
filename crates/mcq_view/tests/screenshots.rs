mod common;

use common::{mirrored_paths, Harness};
use mcq_bridge::{BridgeError, PlatformEvent};
use mcq_core::Notification;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn confirmed_delete_removes_entry_in_place() {
    let harness = Harness::new();
    harness.add_screenshots(&["/a.png", "/b.png", "/c.png"]);
    let view = harness.activate();
    harness.bridge.inner.emit(PlatformEvent::Start);
    view.settled().await;

    view.delete_screenshot(1);
    // Nothing is removed before the platform answers.
    assert_eq!(mirrored_paths(&view), vec!["/a.png", "/b.png", "/c.png"]);
    view.settled().await;

    assert_eq!(mirrored_paths(&view), vec!["/a.png", "/c.png"]);
    let remaining: Vec<_> = harness
        .bridge
        .inner
        .screenshots()
        .into_iter()
        .map(|s| s.path)
        .collect();
    assert_eq!(remaining, vec!["/a.png", "/c.png"]);
    assert!(harness.shell.toasts().is_empty());
}

#[tokio::test]
async fn rejected_delete_notifies_and_keeps_mirror() {
    let harness = Harness::new();
    harness.add_screenshots(&["/a.png", "/b.png"]);
    harness.bridge.inner.fail_delete_of("/a.png");
    let view = harness.activate();
    harness.bridge.inner.emit(PlatformEvent::Start);
    view.settled().await;

    view.delete_screenshot(0);
    view.settled().await;

    assert_eq!(mirrored_paths(&view), vec!["/a.png", "/b.png"]);
    assert_eq!(
        harness.shell.toasts(),
        vec![Notification::error("Error", "Failed to delete screenshot")]
    );
}

#[tokio::test]
async fn delete_out_of_range_does_nothing() {
    let harness = Harness::new();
    harness.add_screenshots(&["/a.png"]);
    let view = harness.activate();
    harness.bridge.inner.emit(PlatformEvent::Start);
    view.settled().await;

    view.delete_screenshot(5);
    view.settled().await;

    assert_eq!(mirrored_paths(&view), vec!["/a.png"]);
    assert_eq!(harness.bridge.inner.screenshots().len(), 1);
    assert!(harness.shell.toasts().is_empty());
}

#[tokio::test]
async fn stale_listing_after_reset_is_discarded() {
    let harness = Harness::new();
    harness.add_screenshots(&["/a.png"]);
    let view = harness.activate();

    harness.bridge.hold_listings();
    harness.bridge.inner.emit(PlatformEvent::Start);
    harness.bridge.inner.emit(PlatformEvent::Reset);
    harness.bridge.release_listings();
    view.settled().await;

    assert_eq!(harness.bridge.listing_calls(), 1);
    assert!(view.state().screenshots().is_empty());
}

#[tokio::test]
async fn listing_answered_after_teardown_is_ignored() {
    let harness = Harness::new();
    harness.add_screenshots(&["/a.png"]);
    let view = harness.activate();

    harness.bridge.hold_listings();
    harness.bridge.inner.emit(PlatformEvent::Start);
    let tasks = view.tasks();
    let renders = harness.shell.render_count();
    view.deactivate();

    harness.bridge.release_listings();
    tasks.close();
    tasks.wait().await;

    assert_eq!(harness.bridge.listing_calls(), 1);
    assert_eq!(harness.shell.render_count(), renders);
}

#[tokio::test]
async fn listing_failure_empties_mirror_silently() {
    let harness = Harness::new();
    harness.add_screenshots(&["/a.png"]);
    let view = harness.activate();
    harness.bridge.inner.emit(PlatformEvent::Start);
    view.settled().await;
    assert_eq!(mirrored_paths(&view), vec!["/a.png"]);

    harness
        .bridge
        .inner
        .fail_listings(Some(BridgeError::Rejected("ipc closed".to_string())));
    harness.bridge.inner.emit(PlatformEvent::Start);
    view.settled().await;

    assert!(mirrored_paths(&view).is_empty());
    assert!(harness.shell.toasts().is_empty());
}

#[tokio::test]
async fn envelope_listing_fills_mirror() {
    let harness = Harness::new();
    harness.add_screenshots(&["/a.png", "/b.png"]);
    harness.bridge.inner.respond_with_envelope(true);
    let view = harness.activate();

    harness.bridge.inner.emit(PlatformEvent::Start);
    view.settled().await;

    let model = view.view();
    assert!(model.show_screenshot_queue);
    assert!(model.queue_loading);
    assert_eq!(mirrored_paths(&view), vec!["/a.png", "/b.png"]);
    assert_eq!(model.screenshots[1].id, "/b.png");
}
