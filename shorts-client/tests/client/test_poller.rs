//! Poller cadence, terminal detection and the attempt bound
//!
//! All tests run on a paused clock; sleeps auto-advance, so asserted
//! durations are exact virtual times.

use std::sync::Arc;
use std::time::Duration;

use shorts_client::{PollConfig, PollState, StatusPoller, WorkflowVariant};

use super::common::*;

#[tokio::test(start_paused = true)]
async fn test_poller_stops_after_terminal_status() {
    let fetch = Arc::new(ScriptedFetch::new(vec![
        FetchStep::Status("prompts_generated"),
        FetchStep::Status("images_generated"),
        FetchStep::Status("videos_generated"),
    ]));
    let handle = StatusPoller::spawn(
        Arc::clone(&fetch),
        "p-1".to_string(),
        WorkflowVariant::Classic,
        PollConfig::default(),
    );
    let mut rx = handle.subscribe();
    let start = tokio::time::Instant::now();

    rx.changed().await.unwrap();
    {
        let snapshot = rx.borrow();
        assert_eq!(snapshot.state, PollState::Polling);
        assert_eq!(
            snapshot.project.as_ref().unwrap().status,
            "prompts_generated"
        );
    }
    assert_eq!(start.elapsed(), Duration::from_secs(3));

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().project.as_ref().unwrap().status, "images_generated");
    assert_eq!(start.elapsed(), Duration::from_secs(6));

    rx.changed().await.unwrap();
    {
        let snapshot = rx.borrow();
        assert_eq!(snapshot.state, PollState::Done);
        assert_eq!(snapshot.project.as_ref().unwrap().status, "videos_generated");
    }
    assert_eq!(start.elapsed(), Duration::from_secs(9));

    // The loop ends after the terminal observation; the channel closes and
    // no further snapshot arrives.
    assert!(rx.changed().await.is_err());
    assert_eq!(fetch.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_done_is_published_exactly_once() {
    let fetch = Arc::new(ScriptedFetch::new(vec![
        FetchStep::Status("prompts_generated"),
        FetchStep::Status("completed"),
    ]));
    let handle = StatusPoller::spawn(
        fetch,
        "p-1".to_string(),
        WorkflowVariant::Classic,
        PollConfig::default(),
    );
    let mut rx = handle.subscribe();

    let mut done_count = 0;
    while rx.changed().await.is_ok() {
        if rx.borrow().state == PollState::Done {
            done_count += 1;
        }
    }
    assert_eq!(done_count, 1);
}

#[tokio::test(start_paused = true)]
async fn test_errors_retry_at_error_interval_then_resume() {
    let fetch = Arc::new(ScriptedFetch::new(vec![
        FetchStep::Fail,
        FetchStep::Fail,
        FetchStep::Status("prompts_generated"),
        FetchStep::Status("completed"),
    ]));
    let handle = StatusPoller::spawn(
        Arc::clone(&fetch),
        "p-1".to_string(),
        WorkflowVariant::Classic,
        PollConfig::default(),
    );
    let mut rx = handle.subscribe();
    let start = tokio::time::Instant::now();

    // First check at the success interval; it fails.
    rx.changed().await.unwrap();
    assert_eq!(start.elapsed(), Duration::from_secs(3));
    assert_eq!(rx.borrow().consecutive_errors, 1);

    // Retries come at the error interval.
    rx.changed().await.unwrap();
    assert_eq!(start.elapsed(), Duration::from_secs(8));
    assert_eq!(rx.borrow().consecutive_errors, 2);

    rx.changed().await.unwrap();
    assert_eq!(start.elapsed(), Duration::from_secs(13));
    {
        let snapshot = rx.borrow();
        assert_eq!(snapshot.consecutive_errors, 0);
        assert_eq!(
            snapshot.project.as_ref().unwrap().status,
            "prompts_generated"
        );
    }

    // Success cadence resumes.
    rx.changed().await.unwrap();
    assert_eq!(start.elapsed(), Duration::from_secs(16));
    assert_eq!(rx.borrow().state, PollState::Done);
}

#[tokio::test(start_paused = true)]
async fn test_failed_fetch_keeps_previous_snapshot() {
    let fetch = Arc::new(ScriptedFetch::new(vec![
        FetchStep::Status("images_generated"),
        FetchStep::Fail,
        FetchStep::Status("completed"),
    ]));
    let handle = StatusPoller::spawn(
        fetch,
        "p-1".to_string(),
        WorkflowVariant::Classic,
        PollConfig::default(),
    );
    let mut rx = handle.subscribe();

    rx.changed().await.unwrap();
    rx.changed().await.unwrap();
    {
        // The error did not erase the last good project snapshot.
        let snapshot = rx.borrow();
        assert_eq!(snapshot.consecutive_errors, 1);
        assert_eq!(snapshot.project.as_ref().unwrap().status, "images_generated");
    }
}

#[tokio::test(start_paused = true)]
async fn test_attempt_budget_publishes_timed_out() {
    let fetch = Arc::new(ScriptedFetch::new(vec![FetchStep::Status(
        "prompts_generated",
    )]));
    let handle = StatusPoller::spawn(
        Arc::clone(&fetch),
        "p-1".to_string(),
        WorkflowVariant::Classic,
        bounded_config(5),
    );
    let mut rx = handle.subscribe();

    let mut last_state = PollState::Polling;
    while rx.changed().await.is_ok() {
        last_state = rx.borrow().state;
    }
    assert_eq!(last_state, PollState::TimedOut);
    assert_eq!(fetch.calls(), 5);
    assert_eq!(rx.borrow().attempts, 5);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_cancels_polling() {
    let fetch = Arc::new(ScriptedFetch::new(vec![FetchStep::Status(
        "prompts_generated",
    )]));
    let handle = StatusPoller::spawn(
        Arc::clone(&fetch),
        "p-1".to_string(),
        WorkflowVariant::Classic,
        PollConfig::default(),
    );
    let mut rx = handle.subscribe();
    rx.changed().await.unwrap();
    let seen = fetch.calls();
    drop(handle);

    // Give the aborted task room; no further fetches may happen.
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(fetch.calls(), seen);
}
