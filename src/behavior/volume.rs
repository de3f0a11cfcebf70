//! Volume lifecycle waits.

use std::time::Duration;

use crate::budget::TimeoutRules;
use crate::progression::{ProgressionError, ProgressionVerifier, StageSpecBuilder};
use crate::source::StatusSource;

use super::status::VolumeStatus;

const MODEL_TYPE: &str = "volume";

/// Behavior helper waiting on block-storage volume lifecycles.
///
/// Each wait constructs a fresh verifier over a borrowed source, so one
/// behavior instance can serve any number of sequential waits.
pub struct VolumeBehavior<S> {
    source: S,
    rules: TimeoutRules,
    poll_rate: Duration,
    retry_limit: u32,
}

impl<S: StatusSource> VolumeBehavior<S> {
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

    /// Waits for a newly created volume to become available.
    ///
    /// Two stages: the volume is first expected to report `creating`, with
    /// `available` acceptable in case the poll interval missed it, then
    /// `available`. The overall budget scales with the volume size in
    /// gigabytes per the configured rules.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError`] when the volume reports an error status,
    /// the budget expires, or the status source keeps failing.
    pub async fn wait_for_create(
        &self,
        volume_id: &str,
        size_gb: u64,
    ) -> Result<(), ProgressionError> {
        self.rules.validate()?;
        ProgressionVerifier::new(MODEL_TYPE, volume_id, &self.source)
            .global_timeout(self.rules.budget(Some(size_gb)))
            .add_stage(
                self.stage()
                    .expected([VolumeStatus::Creating])
                    .acceptable([VolumeStatus::Available])
                    .error([VolumeStatus::Error, VolumeStatus::ErrorDeleting])
                    .build(),
            )
            .add_stage(
                self.stage()
                    .expected([VolumeStatus::Available])
                    .error([VolumeStatus::Error, VolumeStatus::ErrorDeleting])
                    .build(),
            )
            .start()
            .await
    }

    /// Waits for the volume to report `target` within `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError`] when the volume reports an error status,
    /// the timeout expires, or the status source keeps failing.
    pub async fn wait_for_status(
        &self,
        volume_id: &str,
        target: VolumeStatus,
        timeout: Duration,
    ) -> Result<(), ProgressionError> {
        ProgressionVerifier::new(MODEL_TYPE, volume_id, &self.source)
            .add_stage(
                self.stage()
                    .expected([target])
                    .error([VolumeStatus::Error, VolumeStatus::ErrorDeleting])
                    .timeout(timeout)
                    .build(),
            )
            .start()
            .await
    }

    /// Confirms a volume deletion, reporting the outcome as a boolean.
    ///
    /// Deletion waits downgrade timeouts and error statuses to `Ok(false)`
    /// so teardown code can log and move on instead of aborting a test run.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError`] only for configuration problems or an
    /// exhausted status-fetch budget.
    pub async fn confirm_delete(
        &self,
        volume_id: &str,
        timeout: Duration,
    ) -> Result<bool, ProgressionError> {
        let outcome = ProgressionVerifier::new(MODEL_TYPE, volume_id, &self.source)
            .add_stage(
                self.stage()
                    .expected([VolumeStatus::Deleted])
                    .error([VolumeStatus::ErrorDeleting])
                    .timeout(timeout)
                    .build(),
            )
            .start()
            .await;

        match outcome {
            Ok(()) => Ok(true),
            Err(ProgressionError::Timeout { .. } | ProgressionError::ErrorStatus { .. }) => {
                Ok(false)
            }
            Err(other) => Err(other),
        }
    }
}
