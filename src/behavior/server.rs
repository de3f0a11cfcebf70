//! Server lifecycle waits.

use std::time::Duration;

use crate::budget::TimeoutRules;
use crate::progression::{ProgressionError, ProgressionVerifier, StageSpecBuilder};
use crate::source::StatusSource;

use super::status::ServerStatus;

const MODEL_TYPE: &str = "server";

/// Behavior helper waiting on compute-server lifecycles.
///
/// Server builds do not scale with a size parameter; the budget comes from
/// the rules' explicit timeout (clamped by min and max as usual).
pub struct ServerBehavior<S> {
    source: S,
    rules: TimeoutRules,
    poll_rate: Duration,
    retry_limit: u32,
}

impl<S: StatusSource> ServerBehavior<S> {
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

    /// Waits for a newly created server to finish building.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError`] when the server reports `ERROR`, the
    /// budget expires, or the status source keeps failing.
    pub async fn wait_for_build(&self, server_id: &str) -> Result<(), ProgressionError> {
        self.rules.validate()?;
        ProgressionVerifier::new(MODEL_TYPE, server_id, &self.source)
            .global_timeout(self.rules.budget(None))
            .add_stage(
                self.stage()
                    .expected([ServerStatus::Build])
                    .acceptable([ServerStatus::Active])
                    .error([ServerStatus::Error])
                    .build(),
            )
            .add_stage(
                self.stage()
                    .expected([ServerStatus::Active])
                    .error([ServerStatus::Error])
                    .build(),
            )
            .start()
            .await
    }

    /// Waits for the server to report `target` within `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError`] when the server reports `ERROR`, the
    /// timeout expires, or the status source keeps failing.
    pub async fn wait_for_status(
        &self,
        server_id: &str,
        target: ServerStatus,
        timeout: Duration,
    ) -> Result<(), ProgressionError> {
        ProgressionVerifier::new(MODEL_TYPE, server_id, &self.source)
            .add_stage(
                self.stage()
                    .expected([target])
                    .error([ServerStatus::Error])
                    .timeout(timeout)
                    .build(),
            )
            .start()
            .await
    }
}
