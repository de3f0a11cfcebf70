//! Snapshot lifecycle waits.

use std::time::Duration;

use crate::budget::TimeoutRules;
use crate::progression::{ProgressionError, ProgressionVerifier, StageSpecBuilder};
use crate::source::StatusSource;

use super::status::SnapshotStatus;

const MODEL_TYPE: &str = "snapshot";

/// Behavior helper waiting on volume-snapshot lifecycles.
pub struct SnapshotBehavior<S> {
    source: S,
    rules: TimeoutRules,
    poll_rate: Duration,
    retry_limit: u32,
}

impl<S: StatusSource> SnapshotBehavior<S> {
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

    /// Waits for a snapshot to finish creating and become available.
    ///
    /// Snapshot duration tracks the size of the source volume, so the
    /// budget scales with `volume_size_gb` rather than the snapshot itself.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError`] when the snapshot reports an error
    /// status, the budget expires, or the status source keeps failing.
    pub async fn wait_for_create(
        &self,
        snapshot_id: &str,
        volume_size_gb: u64,
    ) -> Result<(), ProgressionError> {
        self.rules.validate()?;
        ProgressionVerifier::new(MODEL_TYPE, snapshot_id, &self.source)
            .global_timeout(self.rules.budget(Some(volume_size_gb)))
            .add_stage(
                self.stage()
                    .expected([SnapshotStatus::Creating])
                    .acceptable([SnapshotStatus::Available])
                    .error([SnapshotStatus::Error, SnapshotStatus::ErrorDeleting])
                    .build(),
            )
            .add_stage(
                self.stage()
                    .expected([SnapshotStatus::Available])
                    .error([SnapshotStatus::Error, SnapshotStatus::ErrorDeleting])
                    .build(),
            )
            .start()
            .await
    }

    /// Confirms a snapshot deletion, reporting the outcome as a boolean.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError`] only for configuration problems or an
    /// exhausted status-fetch budget; timeouts and error statuses surface
    /// as `Ok(false)`.
    pub async fn confirm_delete(
        &self,
        snapshot_id: &str,
        timeout: Duration,
    ) -> Result<bool, ProgressionError> {
        let outcome = ProgressionVerifier::new(MODEL_TYPE, snapshot_id, &self.source)
            .add_stage(
                self.stage()
                    .expected([SnapshotStatus::Deleted])
                    .error([SnapshotStatus::ErrorDeleting])
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
