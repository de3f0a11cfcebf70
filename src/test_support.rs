//! Test support utilities shared across unit and integration tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::source::{SourceFuture, StatusSource};

/// Errors produced by a [`ScriptedStatusSource`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ScriptedSourceError {
    /// A failure seeded into the script.
    #[error("scripted failure: {0}")]
    Scripted(String),
    /// The script ran out of seeded outcomes.
    #[error("status script exhausted")]
    Exhausted,
}

/// Scripted status source that returns pre-seeded outcomes in FIFO order.
///
/// Used to drive deterministic progression runs without HTTP. Clones share
/// the same script and call counter, so a test can keep a handle for
/// assertions while a verifier owns another.
#[derive(Clone, Debug, Default)]
pub struct ScriptedStatusSource {
    outcomes: Arc<Mutex<VecDeque<Result<String, ScriptedSourceError>>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedStatusSource {
    /// Creates a source with no queued outcomes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful status fetch.
    pub fn push_status(&self, status: impl Into<String>) {
        self.lock_outcomes().push_back(Ok(status.into()));
    }

    /// Queues a transient fetch failure.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.lock_outcomes()
            .push_back(Err(ScriptedSourceError::Scripted(message.into())));
    }

    /// Returns how many fetches the source has served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lock_outcomes(&self) -> MutexGuard<'_, VecDeque<Result<String, ScriptedSourceError>>> {
        self.outcomes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StatusSource for ScriptedStatusSource {
    type Error = ScriptedSourceError;

    fn fetch_status(&self) -> SourceFuture<'_, String, Self::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .lock_outcomes()
            .pop_front()
            .unwrap_or_else(|| Err(ScriptedSourceError::Exhausted));
        Box::pin(std::future::ready(outcome))
    }
}
