//! Tests for the drain coordinator state machine

use std::sync::Arc;

use crate::coordinator::DrainCoordinator;

#[test]
fn test_idle_coordinator_grants_slot() {
    let coordinator = DrainCoordinator::new();
    assert!(coordinator.is_idle());
    assert!(coordinator.try_begin());
    assert!(!coordinator.is_idle());
}

#[test]
fn test_request_while_running_is_recorded() {
    let coordinator = DrainCoordinator::new();
    assert!(coordinator.try_begin());

    // A second request does not re-enter; it schedules one follow-up.
    assert!(!coordinator.try_begin());
    assert!(coordinator.finish(), "pending request keeps the slot");
    assert!(!coordinator.finish(), "follow-up pass drains the pending bit");
    assert!(coordinator.is_idle());
}

#[test]
fn test_redundant_requests_coalesce() {
    let coordinator = DrainCoordinator::new();
    assert!(coordinator.try_begin());

    // Many requests while running collapse into exactly one extra pass.
    for _ in 0..50 {
        assert!(!coordinator.try_begin());
    }
    assert!(coordinator.finish());
    assert!(!coordinator.finish());
    assert!(coordinator.is_idle());
}

#[test]
fn test_back_to_back_passes_when_idle() {
    let coordinator = DrainCoordinator::new();

    // Each request after the prior pass finished gets its own pass.
    for _ in 0..3 {
        assert!(coordinator.try_begin());
        assert!(!coordinator.finish());
    }
    assert!(coordinator.is_idle());
}

#[test]
fn test_request_during_followup_pass_schedules_another() {
    let coordinator = DrainCoordinator::new();
    assert!(coordinator.try_begin());
    assert!(!coordinator.try_begin());

    // First pass done, follow-up starts; a request lands mid-follow-up.
    assert!(coordinator.finish());
    assert!(!coordinator.try_begin());
    assert!(coordinator.finish());
    assert!(!coordinator.finish());
}

#[tokio::test]
async fn test_wait_idle_returns_immediately_when_idle() {
    let coordinator = DrainCoordinator::new();
    coordinator.wait_idle().await;
}

#[tokio::test]
async fn test_wait_idle_wakes_on_finish() {
    let coordinator = Arc::new(DrainCoordinator::new());
    assert!(coordinator.try_begin());

    let waiter = {
        let coordinator = Arc::clone(&coordinator);
        tokio::spawn(async move { coordinator.wait_idle().await })
    };

    // Let the waiter register before releasing the slot.
    tokio::task::yield_now().await;
    assert!(!coordinator.finish());

    waiter.await.unwrap();
    assert!(coordinator.is_idle());
}
