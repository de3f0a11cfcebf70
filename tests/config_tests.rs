//! Unit tests for polling configuration and timeout-rule derivation.

use std::time::Duration;

use rstest::{fixture, rstest};
use stagewatch::{ConfigError, PollingConfig};

#[fixture]
fn valid_config() -> PollingConfig {
    PollingConfig {
        auth_token: None,
        poll_rate_secs: 5,
        poll_failure_retry_limit: 3,
        volume_min_timeout_secs: 120,
        volume_max_timeout_secs: 3600,
        volume_wait_per_gb_secs: 60,
        snapshot_min_timeout_secs: 300,
        snapshot_max_timeout_secs: 7200,
        snapshot_wait_per_gb_secs: 120,
        server_build_timeout_secs: 600,
        load_balancer_active_timeout_secs: 300,
    }
}

#[rstest]
fn default_sections_pass_validation(valid_config: PollingConfig) {
    assert_eq!(valid_config.validate(), Ok(()));
}

#[rstest]
fn inverted_volume_bounds_are_rejected_with_actionable_error(valid_config: PollingConfig) {
    let config = PollingConfig {
        volume_min_timeout_secs: 7200,
        volume_max_timeout_secs: 60,
        ..valid_config
    };

    let error = config.validate().expect_err("inverted bounds should fail");
    let ConfigError::InvalidBounds {
        ref section,
        ref message,
    } = error
    else {
        panic!("unexpected error kind: {error:?}");
    };
    assert_eq!(section, "volume");
    assert!(
        message.contains("STAGEWATCH_VOLUME_MIN_TIMEOUT_SECS"),
        "message should name the env var: {message}"
    );
}

#[rstest]
fn inverted_snapshot_bounds_are_rejected(valid_config: PollingConfig) {
    let config = PollingConfig {
        snapshot_min_timeout_secs: 7200,
        snapshot_max_timeout_secs: 60,
        ..valid_config
    };

    let error = config.validate().expect_err("inverted bounds should fail");
    assert!(matches!(
        error,
        ConfigError::InvalidBounds { ref section, .. } if section == "snapshot"
    ));
}

#[rstest]
fn volume_rules_scale_with_size_between_the_clamps(valid_config: PollingConfig) {
    let rules = valid_config.volume_rules();

    assert_eq!(rules.budget(Some(1)), Duration::from_secs(120));
    assert_eq!(rules.budget(Some(10)), Duration::from_secs(600));
    assert_eq!(rules.budget(Some(1000)), Duration::from_secs(3600));
}

#[rstest]
fn server_rules_carry_a_flat_build_budget(valid_config: PollingConfig) {
    let rules = valid_config.server_rules();

    assert_eq!(rules.budget(None), Duration::from_secs(600));
    assert_eq!(rules.budget(Some(100)), Duration::from_secs(600));
}

#[rstest]
fn poll_rate_converts_to_a_duration(valid_config: PollingConfig) {
    assert_eq!(valid_config.poll_rate(), Duration::from_secs(5));
}
