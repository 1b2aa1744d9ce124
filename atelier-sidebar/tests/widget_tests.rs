//! Sidebar widget behaviour against the in-memory host.
//!
//! Each test mounts a fresh widget over its own `FakeEntry`; no shared state.

use atelier_core::AvailabilityStatus::{self, Available, NotForSale, Sold};
use atelier_sidebar::fake::{FakeEntry, HostCall};
use atelier_sidebar::{AvailabilityWidget, BadgeVariant, SidebarAction, SidebarView, UpdateError};
use rstest::rstest;

fn mounted(value: Option<AvailabilityStatus>) -> (FakeEntry, AvailabilityWidget) {
    let fake = FakeEntry::with_value(value);
    let widget = AvailabilityWidget::mount(fake.host());
    (fake, widget)
}

fn labels(view: &SidebarView) -> Vec<&'static str> {
    view.buttons().iter().map(|b| b.label).collect()
}

// ---------------------------------------------------------------------------
// 1. Mount
// ---------------------------------------------------------------------------

#[rstest]
#[case(Available, BadgeVariant::Positive, vec!["Mark as Sold", "Not for Sale"])]
#[case(Sold, BadgeVariant::Negative, vec!["Mark as Available", "Not for Sale"])]
#[case(NotForSale, BadgeVariant::Warning, vec!["Mark Available", "Mark Sold"])]
fn mount_shows_status_and_matching_controls(
    #[case] status: AvailabilityStatus,
    #[case] badge_variant: BadgeVariant,
    #[case] expected: Vec<&'static str>,
) {
    let (fake, widget) = mounted(Some(status));
    let view = widget.view();

    match &view {
        SidebarView::Status { status: shown, badge, busy, error, .. } => {
            assert_eq!(*shown, status);
            assert_eq!(*badge, badge_variant);
            assert!(!busy);
            assert!(error.is_none());
        }
        other => panic!("expected status view, got {other:?}"),
    }
    assert_eq!(labels(&view), expected);
    assert!(view.to_string().contains(&format!("Status: {status}")));
    assert_eq!(fake.listener_count(), 1);
}

#[test]
fn not_for_sale_offers_two_explicit_targets_and_no_toggle() {
    let (_fake, widget) = mounted(Some(NotForSale));
    let view = widget.view();
    assert!(!view.offers(SidebarAction::Toggle));
    assert!(view.offers(SidebarAction::Set(Available)));
    assert!(view.offers(SidebarAction::Set(Sold)));
}

#[test]
fn absent_field_renders_error_only() {
    let fake = FakeEntry::without_field();
    let widget = AvailabilityWidget::mount(fake.host());
    let view = widget.view();

    assert!(matches!(view, SidebarView::ErrorOnly { .. }));
    assert!(view.buttons().is_empty());
    assert_eq!(view.status(), None);
    assert_eq!(
        view.to_string(),
        "Error: Availability field not found on this entry"
    );
    assert!(!widget.is_subscribed());
    assert_eq!(fake.listener_count(), 0);
}

#[test]
fn unset_field_shows_no_data_and_no_controls() {
    let (_fake, widget) = mounted(None);
    let view = widget.view();
    assert_eq!(view, SidebarView::Empty);
    assert_eq!(view.to_string(), "No availability data found");
    assert!(view.buttons().is_empty());
}

#[test]
fn each_mount_has_its_own_subscription_released_on_drop() {
    let fake = FakeEntry::with_value(Some(Available));
    let first = AvailabilityWidget::mount(fake.host());
    let second = AvailabilityWidget::mount(fake.host());
    assert_eq!(fake.listener_count(), 2);

    first.unmount();
    assert_eq!(fake.listener_count(), 1);

    fake.push_external(Some(Sold));
    assert_eq!(second.status(), Some(Sold));

    drop(second);
    assert_eq!(fake.listener_count(), 0);
}

// ---------------------------------------------------------------------------
// 2. External changes
// ---------------------------------------------------------------------------

#[test]
fn external_change_overwrites_local_state() {
    let (fake, widget) = mounted(Some(Available));
    fake.push_external(Some(NotForSale));
    assert_eq!(widget.status(), Some(NotForSale));

    fake.push_external(None);
    assert_eq!(widget.view(), SidebarView::Empty);
}

// ---------------------------------------------------------------------------
// 3. Updates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn toggle_from_available_writes_sold_then_publishes() {
    let (fake, widget) = mounted(Some(Available));

    let written = widget.toggle().await.expect("toggle");

    assert_eq!(written, Some(Sold));
    assert_eq!(fake.calls(), vec![HostCall::SetValue(Sold), HostCall::Publish]);
    assert_eq!(widget.status(), Some(Sold));
    assert!(!widget.is_busy());
    assert_eq!(widget.error(), None);
}

#[tokio::test]
async fn toggle_from_not_for_sale_does_nothing() {
    let (fake, widget) = mounted(Some(NotForSale));
    assert_eq!(widget.toggle().await.expect("toggle"), None);
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn rejected_write_skips_publish_and_clears_busy() {
    let (fake, widget) = mounted(Some(Sold));
    fake.fail_writes("You don't have access to this entry");

    let err = widget.update(Available).await.unwrap_err();

    assert!(matches!(err, UpdateError::WriteFailed { .. }), "got: {err}");
    assert_eq!(fake.calls(), vec![HostCall::SetValue(Available)]);
    assert!(!widget.is_busy());
    assert_eq!(widget.status(), Some(Sold));
    assert_eq!(
        widget.view().error(),
        Some("You don't have access to this entry")
    );
}

#[tokio::test]
async fn rejected_publish_keeps_new_value_and_shows_error() {
    let (fake, widget) = mounted(Some(Available));
    fake.fail_publishes("Validation error");

    let err = widget.update(NotForSale).await.unwrap_err();

    assert!(matches!(err, UpdateError::PublishFailed { .. }), "got: {err}");
    assert_eq!(fake.calls(), vec![HostCall::SetValue(NotForSale), HostCall::Publish]);
    assert_eq!(fake.value(), Some(NotForSale));
    assert!(!widget.is_busy());
    let view = widget.view();
    assert_eq!(view.status(), Some(NotForSale));
    assert_eq!(view.error(), Some("Validation error"));
}

#[tokio::test]
async fn retry_after_failure_clears_error() {
    let (fake, widget) = mounted(Some(Available));
    fake.fail_publishes("Service unavailable");
    widget.update(Sold).await.unwrap_err();
    assert!(widget.error().is_some());

    fake.clear_failures();
    widget.update(Sold).await.expect("retry");
    assert_eq!(widget.error(), None);
    assert_eq!(widget.status(), Some(Sold));
}

#[tokio::test]
async fn field_removed_after_mount_keeps_old_value_with_error() {
    let (fake, widget) = mounted(Some(Available));
    fake.remove_field();

    let err = widget.update(Sold).await.unwrap_err();

    assert_eq!(err, UpdateError::FieldAbsent);
    assert!(fake.calls().is_empty());
    let view = widget.view();
    assert_eq!(view.status(), Some(Available));
    assert_eq!(view.error(), Some("Availability field not found"));
}

#[tokio::test]
async fn update_on_widget_without_field_is_rejected() {
    let fake = FakeEntry::without_field();
    let widget = AvailabilityWidget::mount(fake.host());
    assert_eq!(widget.update(Sold).await, Err(UpdateError::FieldAbsent));
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn controls_are_disabled_while_update_in_flight() {
    let (fake, widget) = mounted(Some(Available));
    let release = fake.hold_next_write();

    let update = widget.perform(SidebarAction::Toggle);
    let drive = async {
        tokio::task::yield_now().await;
        assert!(widget.is_busy());
        assert!(widget.view().buttons().iter().all(|b| !b.enabled));
        let ignored = widget
            .perform(SidebarAction::Set(NotForSale))
            .await
            .expect("ignored");
        assert_eq!(ignored, None);
        release.send(()).expect("release write");
    };
    let (result, ()) = tokio::join!(update, drive);

    assert_eq!(result.expect("toggle"), Some(Sold));
    assert_eq!(fake.calls(), vec![HostCall::SetValue(Sold), HostCall::Publish]);
    assert!(!widget.is_busy());
}

#[tokio::test]
async fn external_change_during_write_wins() {
    let (fake, widget) = mounted(Some(Available));
    let release = fake.hold_next_write();

    let update = widget.update(Sold);
    let drive = async {
        tokio::task::yield_now().await;
        fake.push_external(Some(NotForSale));
        assert_eq!(widget.status(), Some(NotForSale));
        release.send(()).expect("release write");
    };
    let (result, ()) = tokio::join!(update, drive);

    result.expect("update");
    assert_eq!(widget.status(), Some(NotForSale));
    assert_eq!(fake.calls(), vec![HostCall::SetValue(Sold), HostCall::Publish]);
}

#[tokio::test]
async fn perform_ignores_actions_not_on_screen() {
    let (fake, widget) = mounted(Some(Available));
    let result = widget
        .perform(SidebarAction::Set(Sold))
        .await
        .expect("perform");
    assert_eq!(result, None, "Available offers toggle, not an explicit Sold");
    assert!(fake.calls().is_empty());
}
