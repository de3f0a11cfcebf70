//! Unit tests for the timeout-budget arithmetic.

use std::time::Duration;

use rstest::rstest;
use stagewatch::{BudgetError, TimeoutRules, calculate_timeout};

const fn secs(value: u64) -> Duration {
    Duration::from_secs(value)
}

#[test]
fn explicit_timeout_wins_over_size_scaling() {
    let result = calculate_timeout(Some(100), Some(secs(30)), None, None, Some(secs(60)));
    assert_eq!(result, secs(30));
}

#[test]
fn budget_scales_linearly_with_size() {
    let result = calculate_timeout(Some(4), None, None, None, Some(secs(60)));
    assert_eq!(result, secs(240));
}

#[test]
fn missing_size_and_timeout_yield_zero_before_clamping() {
    let result = calculate_timeout(None, None, None, None, Some(secs(60)));
    assert_eq!(result, Duration::ZERO);
}

#[test]
fn minimum_clamp_lifts_small_budgets() {
    let result = calculate_timeout(Some(1), None, Some(secs(120)), None, Some(secs(60)));
    assert_eq!(result, secs(120));
}

#[test]
fn maximum_clamp_caps_large_budgets() {
    let result = calculate_timeout(Some(1000), None, None, Some(secs(3600)), Some(secs(60)));
    assert_eq!(result, secs(3600));
}

#[rstest]
#[case::zero_size(Some(0))]
#[case::tiny(Some(1))]
#[case::moderate(Some(50))]
#[case::huge(Some(u64::MAX))]
#[case::absent(None)]
fn budget_stays_within_ordered_bounds(#[case] size: Option<u64>) {
    let min = secs(120);
    let max = secs(3600);

    let result = calculate_timeout(size, None, Some(min), Some(max), Some(secs(60)));

    assert!(result >= min, "{result:?} fell below the minimum");
    assert!(result <= max, "{result:?} exceeded the maximum");
}

#[test]
fn inverted_bounds_resolve_to_the_maximum() {
    let result = calculate_timeout(Some(10), None, Some(secs(500)), Some(secs(100)), Some(secs(1)));
    assert_eq!(result, secs(100));
}

#[test]
fn rules_validation_rejects_inverted_bounds() {
    let rules = TimeoutRules {
        min_timeout: Some(secs(500)),
        max_timeout: Some(secs(100)),
        ..TimeoutRules::default()
    };

    let error = rules.validate().expect_err("inverted bounds should fail");
    assert_eq!(
        error,
        BudgetError::InvertedBounds {
            min_secs: 500,
            max_secs: 100,
        }
    );
}

#[test]
fn rules_budget_matches_the_free_function() {
    let rules = TimeoutRules {
        timeout: None,
        min_timeout: Some(secs(120)),
        max_timeout: Some(secs(3600)),
        wait_per_unit: Some(secs(60)),
    };

    assert_eq!(rules.budget(Some(10)), secs(600));
    assert_eq!(rules.budget(None), secs(120));
}
