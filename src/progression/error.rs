//! Error types for progression verification.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::budget::BudgetError;

/// Errors raised while driving a resource through its expected lifecycle.
///
/// Every runtime variant names the watched resource and carries the stage's
/// status vocabulary, so a failed wait can be diagnosed without re-running
/// the test that triggered it.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ProgressionError {
    /// Raised when a plan cannot be executed as configured.
    #[error("configuration error: {0}")]
    Config(String),
    /// Raised when the status source exhausts its per-stage failure budget.
    #[error(
        "status source for {model_type} {model_id} failed {failures} times \
         (retry limit {retry_limit}): {message}"
    )]
    StatusPoll {
        /// Resource kind being watched.
        model_type: String,
        /// Identifier of the watched resource.
        model_id: String,
        /// Total fetch failures observed during the stage.
        failures: u32,
        /// Configured tolerance for fetch failures.
        retry_limit: u32,
        /// Message from the last fetch failure.
        message: String,
    },
    /// Raised when the resource reports a status from the stage's error set.
    #[error(
        "{model_type} {model_id} reported error status {observed:?} \
         (expected {expected:?}, acceptable {acceptable:?})"
    )]
    ErrorStatus {
        /// Resource kind being watched.
        model_type: String,
        /// Identifier of the watched resource.
        model_id: String,
        /// Status value that aborted the verification.
        observed: String,
        /// Statuses the stage was waiting for.
        expected: BTreeSet<String>,
        /// Later-lifecycle statuses the stage would also have accepted.
        acceptable: BTreeSet<String>,
    },
    /// Raised when a stage's deadline passes without a terminal status.
    #[error(
        "timeout waiting for {model_type} {model_id}: last observed \
         {last_observed:?}, expected {expected:?}, acceptable {acceptable:?}"
    )]
    Timeout {
        /// Resource kind being watched.
        model_type: String,
        /// Identifier of the watched resource.
        model_id: String,
        /// Most recent status seen before the deadline, if any.
        last_observed: Option<String>,
        /// Statuses the stage was waiting for.
        expected: BTreeSet<String>,
        /// Later-lifecycle statuses the stage would also have accepted.
        acceptable: BTreeSet<String>,
    },
}

impl From<BudgetError> for ProgressionError {
    fn from(value: BudgetError) -> Self {
        Self::Config(value.to_string())
    }
}
