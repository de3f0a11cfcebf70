//! Bounded-retry wrapper around a status source.

use std::time::Duration;

use tokio::time::sleep;

use crate::source::StatusSource;

use super::ProgressionError;

/// Fetches statuses on behalf of one stage, tolerating transient failures.
///
/// The failure counter is scoped to the whole stage: it only ever grows, and
/// an intervening successful fetch does not reset it. A source that fails
/// one call in N will therefore still exhaust the budget on a long enough
/// stage; the limit bounds total flakiness, not consecutive failures.
#[derive(Debug)]
pub struct StatusPoller {
    poll_rate: Duration,
    retry_limit: u32,
    failures: u32,
}

impl StatusPoller {
    /// Creates a poller with a fresh failure budget.
    #[must_use]
    pub const fn new(poll_rate: Duration, retry_limit: u32) -> Self {
        Self {
            poll_rate,
            retry_limit,
            failures: 0,
        }
    }

    /// Fetches the current status, retrying transient source failures.
    ///
    /// Sleeps the poll rate between retries. The `retry_limit + 1`th failed
    /// fetch surfaces as [`ProgressionError::StatusPoll`].
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError::StatusPoll`] when the failure budget is
    /// exhausted.
    pub async fn poll<S: StatusSource>(
        &mut self,
        source: &S,
        model_type: &str,
        model_id: &str,
    ) -> Result<String, ProgressionError> {
        loop {
            match source.fetch_status().await {
                Ok(status) => return Ok(status),
                Err(err) => {
                    self.failures += 1;
                    if self.failures > self.retry_limit {
                        return Err(ProgressionError::StatusPoll {
                            model_type: model_type.to_owned(),
                            model_id: model_id.to_owned(),
                            failures: self.failures,
                            retry_limit: self.retry_limit,
                            message: err.to_string(),
                        });
                    }
                    tracing::warn!(
                        "status fetch for {model_type} {model_id} failed \
                         ({failures}/{limit}): {err}",
                        failures = self.failures,
                        limit = self.retry_limit,
                    );
                    sleep(self.poll_rate).await;
                }
            }
        }
    }
}
