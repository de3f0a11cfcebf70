//! Stage specifications for progression plans.

use std::collections::BTreeSet;
use std::time::Duration;

const DEFAULT_POLL_RATE: Duration = Duration::from_secs(5);
const DEFAULT_RETRY_LIMIT: u32 = 3;

/// One phase of an expected lifecycle transition.
///
/// A stage ends successfully when the resource reports a status from the
/// expected set, or from the acceptable set (the resource raced ahead of the
/// poll interval). A status from the error set aborts the whole
/// verification. Statuses appearing in more than one set are classified in
/// the fixed order error, expected, acceptable, so the failure reading
/// always wins.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StageSpec {
    pub(crate) expected: BTreeSet<String>,
    pub(crate) acceptable: BTreeSet<String>,
    pub(crate) error: BTreeSet<String>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) poll_rate: Duration,
    pub(crate) poll_failure_retry_limit: u32,
}

impl StageSpec {
    /// Starts a builder for a [`StageSpec`].
    #[must_use]
    pub fn builder() -> StageSpecBuilder {
        StageSpecBuilder::new()
    }
}

/// Builder for [`StageSpec`].
///
/// Defaults: no stage-local timeout (the plan's global timeout applies), a
/// five second poll rate, and three tolerated status-fetch failures.
#[derive(Clone, Debug)]
pub struct StageSpecBuilder {
    expected: BTreeSet<String>,
    acceptable: BTreeSet<String>,
    error: BTreeSet<String>,
    timeout: Option<Duration>,
    poll_rate: Duration,
    poll_failure_retry_limit: u32,
}

impl Default for StageSpecBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StageSpecBuilder {
    /// Creates a builder with empty status sets and default polling knobs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            expected: BTreeSet::new(),
            acceptable: BTreeSet::new(),
            error: BTreeSet::new(),
            timeout: None,
            poll_rate: DEFAULT_POLL_RATE,
            poll_failure_retry_limit: DEFAULT_RETRY_LIMIT,
        }
    }

    /// Sets the statuses that end this stage successfully.
    #[must_use]
    pub fn expected<I, T>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.expected = statuses.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the later-lifecycle statuses that also end this stage.
    #[must_use]
    pub fn acceptable<I, T>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.acceptable = statuses.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the statuses that abort the whole verification.
    #[must_use]
    pub fn error<I, T>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.error = statuses.into_iter().map(Into::into).collect();
        self
    }

    /// Sets a stage-local timeout.
    ///
    /// When the plan also carries a global timeout the effective deadline is
    /// the earlier of the two.
    #[must_use]
    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = Some(value);
        self
    }

    /// Sets the sleep between status checks.
    #[must_use]
    pub fn poll_rate(mut self, value: Duration) -> Self {
        self.poll_rate = value;
        self
    }

    /// Sets how many status-fetch failures the stage tolerates in total.
    #[must_use]
    pub fn poll_failure_retry_limit(mut self, value: u32) -> Self {
        self.poll_failure_retry_limit = value;
        self
    }

    /// Builds the stage specification.
    #[must_use]
    pub fn build(self) -> StageSpec {
        StageSpec {
            expected: self.expected,
            acceptable: self.acceptable,
            error: self.error,
            timeout: self.timeout,
            poll_rate: self.poll_rate,
            poll_failure_retry_limit: self.poll_failure_retry_limit,
        }
    }
}
