//! Status-progression verification engine.
//!
//! A [`ProgressionVerifier`] walks a resource through an ordered list of
//! [`StageSpec`]s, polling a [`StatusSource`] until each stage observes one
//! of its terminal statuses or runs out of time. Every `wait_for_*` helper
//! in the behavior layer is a thin instantiation of this engine.

mod error;
mod poller;
mod stage;

use std::time::{Duration, Instant};

use tokio::time::sleep;

use crate::source::StatusSource;

pub use error::ProgressionError;
pub use poller::StatusPoller;
pub use stage::{StageSpec, StageSpecBuilder};

/// One run of a progression plan bound to a single resource.
///
/// A verifier is constructed fresh per wait operation and consumed by
/// [`start`](Self::start); retrying a failed progression means building a
/// new verifier. Stages execute strictly in the order they were added, and
/// polls within a stage never overlap.
pub struct ProgressionVerifier<S> {
    model_type: String,
    model_id: String,
    source: S,
    stages: Vec<StageSpec>,
    global_timeout: Option<Duration>,
}

impl<S: StatusSource> ProgressionVerifier<S> {
    /// Creates a verifier for the given resource and status source.
    #[must_use]
    pub fn new(model_type: impl Into<String>, model_id: impl Into<String>, source: S) -> Self {
        Self {
            model_type: model_type.into(),
            model_id: model_id.into(),
            source,
            stages: Vec::new(),
            global_timeout: None,
        }
    }

    /// Sets one deadline shared across all stages of the plan.
    ///
    /// The global budget is consumed as stages run; it is not reset per
    /// stage. A stage-local timeout can only shorten the remaining budget.
    #[must_use]
    pub fn global_timeout(mut self, value: Duration) -> Self {
        self.global_timeout = Some(value);
        self
    }

    /// Appends the next stage of the expected lifecycle.
    #[must_use]
    pub fn add_stage(mut self, stage: StageSpec) -> Self {
        self.stages.push(stage);
        self
    }

    /// Drives the plan to completion, blocking the task until the resource
    /// finishes the final stage or the verification fails.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError::Config`] when the plan is empty or a
    /// stage resolves no deadline, [`ProgressionError::ErrorStatus`] when an
    /// error status is observed, [`ProgressionError::Timeout`] when a
    /// deadline passes without progress, and [`ProgressionError::StatusPoll`]
    /// when the status source exhausts a stage's failure budget.
    pub async fn start(self) -> Result<(), ProgressionError> {
        self.validate_plan()?;
        let global_deadline = self.global_timeout.map(|value| Instant::now() + value);

        for (index, spec) in self.stages.iter().enumerate() {
            self.run_stage(index, spec, global_deadline).await?;
        }
        Ok(())
    }

    fn validate_plan(&self) -> Result<(), ProgressionError> {
        if self.stages.is_empty() {
            return Err(ProgressionError::Config(format!(
                "progression plan for {} {} has no stages",
                self.model_type, self.model_id
            )));
        }
        if self.global_timeout.is_none() {
            for (index, spec) in self.stages.iter().enumerate() {
                if spec.timeout.is_none() {
                    return Err(ProgressionError::Config(format!(
                        "stage {index} for {} {} has no timeout and the plan \
                         has no global timeout",
                        self.model_type, self.model_id
                    )));
                }
            }
        }
        Ok(())
    }

    async fn run_stage(
        &self,
        index: usize,
        spec: &StageSpec,
        global_deadline: Option<Instant>,
    ) -> Result<(), ProgressionError> {
        let stage_deadline = spec.timeout.map(|value| Instant::now() + value);
        let deadline = match (stage_deadline, global_deadline) {
            (Some(stage), Some(global)) => stage.min(global),
            (Some(stage), None) => stage,
            (None, Some(global)) => global,
            (None, None) => {
                return Err(ProgressionError::Config(format!(
                    "stage {index} for {} {} resolved no deadline",
                    self.model_type, self.model_id
                )));
            }
        };

        let mut poller = StatusPoller::new(spec.poll_rate, spec.poll_failure_retry_limit);
        let mut last_observed = None;

        while Instant::now() < deadline {
            let status = poller
                .poll(&self.source, &self.model_type, &self.model_id)
                .await?;

            if spec.error.contains(&status) {
                return Err(ProgressionError::ErrorStatus {
                    model_type: self.model_type.clone(),
                    model_id: self.model_id.clone(),
                    observed: status,
                    expected: spec.expected.clone(),
                    acceptable: spec.acceptable.clone(),
                });
            }
            if spec.expected.contains(&status) || spec.acceptable.contains(&status) {
                tracing::debug!(
                    "{} {} reached {status:?}, stage {index} complete",
                    self.model_type,
                    self.model_id,
                );
                return Ok(());
            }

            last_observed = Some(status);
            sleep(spec.poll_rate).await;
        }

        Err(ProgressionError::Timeout {
            model_type: self.model_type.clone(),
            model_id: self.model_id.clone(),
            last_observed,
            expected: spec.expected.clone(),
            acceptable: spec.acceptable.clone(),
        })
    }
}

#[cfg(test)]
mod tests;
