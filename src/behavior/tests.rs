use super::*;
use crate::budget::TimeoutRules;
use crate::progression::ProgressionError;
use crate::test_support::ScriptedStatusSource;
use std::time::Duration;

fn fast_rules() -> TimeoutRules {
    TimeoutRules {
        timeout: None,
        min_timeout: Some(Duration::from_secs(1)),
        max_timeout: Some(Duration::from_secs(5)),
        wait_per_unit: Some(Duration::from_secs(1)),
    }
}

fn volume_behavior(source: &ScriptedStatusSource) -> VolumeBehavior<ScriptedStatusSource> {
    VolumeBehavior::new(source.clone(), fast_rules())
        .poll_rate(Duration::ZERO)
        .retry_limit(0)
}

#[tokio::test]
async fn volume_create_advances_through_both_stages() {
    let source = ScriptedStatusSource::new();
    source.push_status("creating");
    source.push_status("creating");
    source.push_status("available");

    let result = volume_behavior(&source).wait_for_create("vol-1", 1).await;

    assert!(result.is_ok(), "unexpected create outcome: {result:?}");
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn volume_create_accepts_a_bypassed_first_stage() {
    let source = ScriptedStatusSource::new();
    source.push_status("available");
    source.push_status("available");

    let result = volume_behavior(&source).wait_for_create("vol-1", 1).await;

    assert!(result.is_ok(), "unexpected create outcome: {result:?}");
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn volume_create_aborts_on_error_without_polling_further() {
    let source = ScriptedStatusSource::new();
    source.push_status("error");
    source.push_status("available");

    let result = volume_behavior(&source).wait_for_create("vol-1", 1).await;

    assert!(matches!(result, Err(ProgressionError::ErrorStatus { .. })));
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn volume_create_rejects_inverted_timeout_rules() {
    let source = ScriptedStatusSource::new();
    let rules = TimeoutRules {
        min_timeout: Some(Duration::from_secs(10)),
        max_timeout: Some(Duration::from_secs(1)),
        ..TimeoutRules::default()
    };
    let behavior = VolumeBehavior::new(source.clone(), rules).poll_rate(Duration::ZERO);

    let result = behavior.wait_for_create("vol-1", 1).await;

    assert!(matches!(result, Err(ProgressionError::Config(_))));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn confirm_delete_reports_completion() {
    let source = ScriptedStatusSource::new();
    source.push_status("deleting");
    source.push_status("deleted");

    let deleted = volume_behavior(&source)
        .confirm_delete("vol-1", Duration::from_secs(1))
        .await;

    assert_eq!(deleted.ok(), Some(true));
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn confirm_delete_downgrades_timeout_to_false() {
    let source = ScriptedStatusSource::new();
    for _ in 0..100 {
        source.push_status("deleting");
    }

    let deleted = volume_behavior(&source)
        .poll_rate(Duration::from_millis(1))
        .confirm_delete("vol-1", Duration::from_millis(10))
        .await;

    assert_eq!(deleted.ok(), Some(false));
}

#[tokio::test]
async fn server_build_walks_build_then_active() {
    let source = ScriptedStatusSource::new();
    source.push_status("BUILD");
    source.push_status("BUILD");
    source.push_status("ACTIVE");

    let behavior = ServerBehavior::new(
        source.clone(),
        TimeoutRules {
            timeout: Some(Duration::from_secs(1)),
            ..TimeoutRules::default()
        },
    )
    .poll_rate(Duration::ZERO)
    .retry_limit(0);

    let result = behavior.wait_for_build("srv-1").await;

    assert!(result.is_ok(), "unexpected build outcome: {result:?}");
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn load_balancer_activation_polls_through_pending_states() {
    let source = ScriptedStatusSource::new();
    source.push_status("pending_create");
    source.push_status("pending_update");
    source.push_status("active");

    let behavior = LoadBalancerBehavior::new(
        source.clone(),
        TimeoutRules {
            timeout: Some(Duration::from_secs(1)),
            ..TimeoutRules::default()
        },
    )
    .poll_rate(Duration::ZERO)
    .retry_limit(0);

    let result = behavior.wait_for_active("lb-1").await;

    assert!(result.is_ok(), "unexpected activation outcome: {result:?}");
    assert_eq!(source.calls(), 3);
}
