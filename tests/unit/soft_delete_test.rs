// Soft-delete state machine tests under paused tokio time: the grace
// window, undo, commit, failure recovery, and the undo-affordance contract.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::time::Duration;

use helpers::{list_with, product, MockDeleteGateway, ParkingDeleteGateway, RecordingNotifier, GRACE};
use vetshop::modules::deletions::models::DeleteState;
use vetshop::modules::deletions::services::{DeleteError, SoftDeleteList};

/// Let spawned timer tasks and their continuations run.
async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

async fn advance_past_grace() {
    // Let freshly spawned timer tasks register their sleeps before the
    // paused clock jumps, so the grace deadline lands in the past.
    settle().await;
    tokio::time::advance(GRACE + Duration::from_millis(1)).await;
    settle().await;
}

#[tokio::test(start_paused = true)]
async fn test_undo_before_expiry_prevents_remote_call() {
    let gateway = MockDeleteGateway::new();
    let notifier = RecordingNotifier::new();
    let list = list_with(gateway.clone(), notifier.clone(), vec![product("p1", "Kibble")]);

    list.request_delete("p1").unwrap();
    assert_eq!(list.state_of("p1"), Some(DeleteState::PendingDelete));
    assert!(list.entities(None)[0].is_temporarily_deleted);

    tokio::time::advance(Duration::from_millis(1000)).await;
    settle().await;

    assert!(list.undo("p1"));
    assert_eq!(list.state_of("p1"), Some(DeleteState::Active));
    assert!(!list.entities(None)[0].is_temporarily_deleted);

    // The armed timer still fires; it must be a dead letter.
    advance_past_grace().await;

    assert_eq!(gateway.plain_calls(), 0);
    assert_eq!(list.state_of("p1"), Some(DeleteState::Active));
    assert_eq!(list.entities(None).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_commit_after_expiry_issues_exactly_one_call() {
    let gateway = MockDeleteGateway::new();
    let notifier = RecordingNotifier::new();
    let list = list_with(gateway.clone(), notifier.clone(), vec![product("p1", "Kibble")]);

    list.request_delete("p1").unwrap();
    advance_past_grace().await;

    assert_eq!(gateway.plain_calls(), 1);
    assert_eq!(gateway.cascade_calls(), 0);
    // Terminal: both the entity and its session are gone.
    assert_eq!(list.state_of("p1"), None);
    assert!(list.entities(None).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_undo_is_inert_while_remote_call_is_in_flight() {
    let gateway = ParkingDeleteGateway::new();
    let notifier = RecordingNotifier::new();
    let list = SoftDeleteList::new(gateway.clone(), notifier.clone(), GRACE);
    list.insert(product("p1", "Kibble"));

    list.request_delete("p1").unwrap();
    advance_past_grace().await;

    // The timer fired and the remote call is parked inside the gateway.
    assert_eq!(gateway.calls(), 1);
    assert_eq!(list.state_of("p1"), Some(DeleteState::Deleting));

    // Too late to undo: the in-flight call runs to completion regardless.
    assert!(!list.undo("p1"));
    assert_eq!(list.state_of("p1"), Some(DeleteState::Deleting));
    assert!(list.entities(None)[0].is_temporarily_deleted);
    assert!(!notifier.undo_visible("p1"));

    gateway.release();
    settle().await;

    assert_eq!(list.state_of("p1"), None);
    assert!(list.entities(None).is_empty());
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_undo_is_idempotent_and_inert_after_expiry() {
    let gateway = MockDeleteGateway::new();
    let notifier = RecordingNotifier::new();
    let list = list_with(gateway.clone(), notifier.clone(), vec![product("p1", "Kibble")]);

    // Never deleted: nothing to undo.
    assert!(!list.undo("p1"));
    assert!(!list.undo("missing"));

    list.request_delete("p1").unwrap();
    assert!(list.undo("p1"));
    assert!(!list.undo("p1")); // second undo is a no-op

    list.request_delete("p1").unwrap();
    advance_past_grace().await;

    // Resolved by commit; undo after the fact changes nothing.
    assert!(!list.undo("p1"));
    assert_eq!(gateway.plain_calls(), 1);
    assert!(list.entities(None).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_redelete_after_undo_uses_fresh_grace_window() {
    let gateway = MockDeleteGateway::new();
    let notifier = RecordingNotifier::new();
    let list = list_with(gateway.clone(), notifier.clone(), vec![product("p1", "Kibble")]);

    list.request_delete("p1").unwrap();
    tokio::time::advance(Duration::from_millis(4000)).await;
    settle().await;
    assert!(list.undo("p1"));

    list.request_delete("p1").unwrap();
    // Only 2s since the second request: the first (stale) timer deadline
    // passes but nothing may fire.
    tokio::time::advance(Duration::from_millis(2000)).await;
    settle().await;
    assert_eq!(gateway.plain_calls(), 0);
    assert_eq!(list.state_of("p1"), Some(DeleteState::PendingDelete));

    advance_past_grace().await;
    assert_eq!(gateway.plain_calls(), 1);
    assert!(list.entities(None).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_remote_failure_restores_entity_and_surfaces_error() {
    let gateway = MockDeleteGateway::new();
    let notifier = RecordingNotifier::new();
    gateway.script_plain(Err(DeleteError::Status {
        status: 500,
        message: "upstream exploded".to_string(),
    }));
    let list = list_with(gateway.clone(), notifier.clone(), vec![product("p1", "Kibble")]);

    list.request_delete("p1").unwrap();
    advance_past_grace().await;

    assert_eq!(gateway.plain_calls(), 1);
    assert_eq!(list.state_of("p1"), Some(DeleteState::Active));
    let entities = list.entities(None);
    assert_eq!(entities.len(), 1);
    assert!(!entities[0].is_temporarily_deleted);
    assert!(notifier.error_shown("p1"));

    // The entity is deletable again after recovery.
    list.request_delete("p1").unwrap();
    advance_past_grace().await;
    assert_eq!(gateway.plain_calls(), 2);
    assert!(list.entities(None).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_timeout_failure_behaves_like_any_other_failure() {
    let gateway = MockDeleteGateway::new();
    let notifier = RecordingNotifier::new();
    gateway.script_plain(Err(DeleteError::Timeout));
    let list = list_with(gateway.clone(), notifier.clone(), vec![product("p1", "Kibble")]);

    list.request_delete("p1").unwrap();
    advance_past_grace().await;

    assert_eq!(list.state_of("p1"), Some(DeleteState::Active));
    assert!(notifier.error_shown("p1"));
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_request_delete_is_rejected() {
    let gateway = MockDeleteGateway::new();
    let notifier = RecordingNotifier::new();
    let list = list_with(gateway.clone(), notifier.clone(), vec![product("p1", "Kibble")]);

    list.request_delete("p1").unwrap();
    assert!(list.request_delete("p1").is_err());

    advance_past_grace().await;
    // Only the first request armed a timer.
    assert_eq!(gateway.plain_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_entity_is_not_found() {
    let gateway = MockDeleteGateway::new();
    let notifier = RecordingNotifier::new();
    let list = list_with(gateway.clone(), notifier.clone(), vec![]);

    assert!(list.request_delete("ghost").is_err());
}

#[tokio::test(start_paused = true)]
async fn test_undo_affordance_spans_exactly_the_pending_state() {
    let gateway = MockDeleteGateway::new();
    let notifier = RecordingNotifier::new();
    let list = list_with(gateway.clone(), notifier.clone(), vec![product("p1", "Kibble")]);

    assert!(!notifier.undo_visible("p1"));

    list.request_delete("p1").unwrap();
    assert!(notifier.undo_visible("p1"));

    tokio::time::advance(GRACE - Duration::from_millis(1)).await;
    settle().await;
    assert!(notifier.undo_visible("p1"), "visible until the window closes");

    advance_past_grace().await;
    assert!(!notifier.undo_visible("p1"), "gone once PendingDelete is exited");
}

#[tokio::test(start_paused = true)]
async fn test_undo_affordance_disappears_on_undo_too() {
    let gateway = MockDeleteGateway::new();
    let notifier = RecordingNotifier::new();
    let list = list_with(gateway.clone(), notifier.clone(), vec![product("p1", "Kibble")]);

    list.request_delete("p1").unwrap();
    assert!(notifier.undo_visible("p1"));
    list.undo("p1");
    assert!(!notifier.undo_visible("p1"));
}

#[tokio::test(start_paused = true)]
async fn test_entity_lifecycles_are_independent() {
    let gateway = MockDeleteGateway::new();
    let notifier = RecordingNotifier::new();
    let list = list_with(
        gateway.clone(),
        notifier.clone(),
        vec![product("p1", "Kibble"), product("p2", "Litter")],
    );

    list.request_delete("p1").unwrap();
    list.request_delete("p2").unwrap();
    assert!(list.undo("p2"));

    advance_past_grace().await;

    assert_eq!(gateway.plain_calls(), 1);
    let remaining = list.entities(None);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, "p2");
    assert!(!remaining[0].is_temporarily_deleted);
}
