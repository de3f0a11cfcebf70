//! Load-balancer provisioning waits.

use std::time::Duration;

use crate::budget::TimeoutRules;
use crate::progression::{ProgressionError, ProgressionVerifier, StageSpecBuilder};
use crate::source::StatusSource;

use super::status::LoadBalancerStatus;

const MODEL_TYPE: &str = "load_balancer";

/// Behavior helper waiting on load balancers, listeners, and pools.
///
/// Provisioning statuses cycle through `pending_*` values on every mutation,
/// so activation waits are single-stage: anything pending simply keeps the
/// poll loop going until `active` or `error` appears.
pub struct LoadBalancerBehavior<S> {
    source: S,
    rules: TimeoutRules,
    poll_rate: Duration,
    retry_limit: u32,
}

impl<S: StatusSource> LoadBalancerBehavior<S> {
    /// Creates a behavior over the given source and timeout rules.
    #[must_use]
    pub fn new(source: S, rules: TimeoutRules) -> Self {
        Self {
            source,
            rules,
            poll_rate: super::DEFAULT_POLL_RATE,
            retry_limit: super::DEFAULT_RETRY_LIMIT,
        }
    }

    /// Overrides the sleep between status checks.
    #[must_use]
    pub fn poll_rate(mut self, value: Duration) -> Self {
        self.poll_rate = value;
        self
    }

    /// Overrides the tolerated status-fetch failures per stage.
    #[must_use]
    pub fn retry_limit(mut self, value: u32) -> Self {
        self.retry_limit = value;
        self
    }

    fn stage(&self) -> StageSpecBuilder {
        super::stage(self.poll_rate, self.retry_limit)
    }

    /// Waits for the balancer (or one of its children) to become active.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError`] when an `error` status is reported, the
    /// budget expires, or the status source keeps failing.
    pub async fn wait_for_active(&self, balancer_id: &str) -> Result<(), ProgressionError> {
        self.rules.validate()?;
        ProgressionVerifier::new(MODEL_TYPE, balancer_id, &self.source)
            .global_timeout(self.rules.budget(None))
            .add_stage(
                self.stage()
                    .expected([LoadBalancerStatus::Active])
                    .error([LoadBalancerStatus::Error])
                    .build(),
            )
            .start()
            .await
    }

    /// Waits for the balancer to report `target` within `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError`] when an `error` status is reported, the
    /// timeout expires, or the status source keeps failing.
    pub async fn wait_for_status(
        &self,
        balancer_id: &str,
        target: LoadBalancerStatus,
        timeout: Duration,
    ) -> Result<(), ProgressionError> {
        ProgressionVerifier::new(MODEL_TYPE, balancer_id, &self.source)
            .add_stage(
                self.stage()
                    .expected([target])
                    .error([LoadBalancerStatus::Error])
                    .timeout(timeout)
                    .build(),
            )
            .start()
            .await
    }
}
