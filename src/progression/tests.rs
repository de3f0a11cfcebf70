use super::*;
use crate::test_support::ScriptedStatusSource;
use std::time::Duration;

fn stage(expected: &[&str], acceptable: &[&str], error: &[&str]) -> StageSpecBuilder {
    StageSpec::builder()
        .expected(expected.iter().copied())
        .acceptable(acceptable.iter().copied())
        .error(error.iter().copied())
        .poll_rate(Duration::ZERO)
        .poll_failure_retry_limit(0)
}

fn verifier(source: &ScriptedStatusSource) -> ProgressionVerifier<ScriptedStatusSource> {
    ProgressionVerifier::new("volume", "vol-1", source.clone())
}

#[tokio::test]
async fn empty_plan_is_a_configuration_error() {
    let source = ScriptedStatusSource::new();
    let result = verifier(&source).start().await;
    assert!(matches!(result, Err(ProgressionError::Config(_))));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn stage_without_any_timeout_is_rejected_before_polling() {
    let source = ScriptedStatusSource::new();
    source.push_status("available");

    let result = verifier(&source)
        .add_stage(stage(&["available"], &[], &[]).build())
        .start()
        .await;

    assert!(matches!(result, Err(ProgressionError::Config(_))));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn error_classification_wins_over_expected() {
    let source = ScriptedStatusSource::new();
    source.push_status("ready");

    let result = verifier(&source)
        .global_timeout(Duration::from_secs(5))
        .add_stage(stage(&["ready"], &[], &["ready"]).build())
        .start()
        .await;

    assert!(matches!(
        result,
        Err(ProgressionError::ErrorStatus { observed, .. }) if observed == "ready"
    ));
}

#[tokio::test]
async fn stage_timeout_cannot_extend_the_global_budget() {
    let source = ScriptedStatusSource::new();
    for _ in 0..200 {
        source.push_status("pending");
    }

    let result = verifier(&source)
        .global_timeout(Duration::from_millis(10))
        .add_stage(
            stage(&["available"], &[], &[])
                .timeout(Duration::from_secs(3600))
                .poll_rate(Duration::from_millis(1))
                .build(),
        )
        .start()
        .await;

    assert!(matches!(
        result,
        Err(ProgressionError::Timeout { last_observed: Some(ref seen), .. }) if seen == "pending"
    ));
}

#[tokio::test]
async fn global_budget_is_consumed_across_stages() {
    let source = ScriptedStatusSource::new();
    source.push_status("creating");
    for _ in 0..200 {
        source.push_status("creating");
    }

    let result = verifier(&source)
        .global_timeout(Duration::from_millis(20))
        .add_stage(
            stage(&["creating"], &[], &[])
                .poll_rate(Duration::from_millis(1))
                .build(),
        )
        .add_stage(
            stage(&["available"], &[], &[])
                .poll_rate(Duration::from_millis(1))
                .build(),
        )
        .start()
        .await;

    let Err(ProgressionError::Timeout { expected, .. }) = result else {
        panic!("second stage should exhaust the shared budget");
    };
    assert!(expected.contains("available"));
}

#[tokio::test]
async fn poller_surfaces_exhausted_failure_budget() {
    let source = ScriptedStatusSource::new();
    for _ in 0..3 {
        source.push_failure("connection reset");
    }

    let mut poller = StatusPoller::new(Duration::ZERO, 2);
    let result = poller.poll(&source, "volume", "vol-1").await;

    assert!(matches!(
        result,
        Err(ProgressionError::StatusPoll {
            failures: 3,
            retry_limit: 2,
            ..
        })
    ));
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn poller_failure_budget_spans_the_whole_stage() {
    let source = ScriptedStatusSource::new();
    source.push_failure("reset");
    source.push_status("pending");
    source.push_failure("reset");

    let mut poller = StatusPoller::new(Duration::ZERO, 1);
    let first = poller.poll(&source, "volume", "vol-1").await;
    assert_eq!(first.ok().as_deref(), Some("pending"));

    let second = poller.poll(&source, "volume", "vol-1").await;
    assert!(matches!(
        second,
        Err(ProgressionError::StatusPoll { failures: 2, .. })
    ));
}
