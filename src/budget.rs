//! Timeout-budget arithmetic for progression waits.

use std::time::Duration;

use thiserror::Error;

/// Errors raised when a timeout rule set fails validation.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum BudgetError {
    /// Raised when the configured minimum exceeds the configured maximum.
    #[error("minimum timeout {min_secs}s exceeds maximum timeout {max_secs}s")]
    InvertedBounds {
        /// Configured lower bound in seconds.
        min_secs: u64,
        /// Configured upper bound in seconds.
        max_secs: u64,
    },
}

/// Derives a single wait deadline from a resource size and timeout rules.
///
/// An explicit `timeout` wins outright. Otherwise, when both `size` and
/// `wait_per_unit` are present, the budget scales linearly with the size.
/// The running value is then clamped up to `min_timeout` and down to
/// `max_timeout`, in that order, so inverted bounds resolve to
/// `max_timeout`. Reject inverted bounds up front with
/// [`TimeoutRules::validate`] rather than relying on that fallback.
///
/// With neither `timeout` nor `size` given the pre-clamp value is zero;
/// callers owning a base timeout must add it themselves.
#[must_use]
pub fn calculate_timeout(
    size: Option<u64>,
    timeout: Option<Duration>,
    min_timeout: Option<Duration>,
    max_timeout: Option<Duration>,
    wait_per_unit: Option<Duration>,
) -> Duration {
    let mut value = timeout.unwrap_or(Duration::ZERO);
    if value.is_zero() {
        if let (Some(units), Some(per_unit)) = (size, wait_per_unit) {
            value = Duration::from_secs(per_unit.as_secs().saturating_mul(units));
        }
    }
    if let Some(min) = min_timeout {
        value = value.max(min);
    }
    if let Some(max) = max_timeout {
        value = value.min(max);
    }
    value
}

/// Timeout parameters carried by a behavior adapter or configuration section.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TimeoutRules {
    /// Explicit override; when set it bypasses the size-derived budget.
    pub timeout: Option<Duration>,
    /// Lower clamp applied after the size-derived budget.
    pub min_timeout: Option<Duration>,
    /// Upper clamp applied last.
    pub max_timeout: Option<Duration>,
    /// Wait granted per unit of resource size (for example per gigabyte).
    pub wait_per_unit: Option<Duration>,
}

impl TimeoutRules {
    /// Rejects rule sets whose minimum exceeds their maximum.
    ///
    /// # Errors
    ///
    /// Returns [`BudgetError::InvertedBounds`] when both bounds are set and
    /// inverted.
    pub fn validate(&self) -> Result<(), BudgetError> {
        if let (Some(min), Some(max)) = (self.min_timeout, self.max_timeout) {
            if min > max {
                return Err(BudgetError::InvertedBounds {
                    min_secs: min.as_secs(),
                    max_secs: max.as_secs(),
                });
            }
        }
        Ok(())
    }

    /// Computes the wait budget for a resource of the given size.
    #[must_use]
    pub fn budget(&self, size: Option<u64>) -> Duration {
        calculate_timeout(
            size,
            self.timeout,
            self.min_timeout,
            self.max_timeout,
            self.wait_per_unit,
        )
    }
}
