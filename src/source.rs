//! Status-source abstraction for resources watched by progression waits.

use std::future::Future;
use std::pin::Pin;

/// Future returned by status-source operations.
pub type SourceFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Read-only view of a remote resource's current lifecycle status.
///
/// A source is bound to exactly one resource; the verifier calls it once per
/// poll tick and never concurrently. Any error the source returns is treated
/// as a transient fetch failure and counted against the stage's retry budget,
/// not as a business status.
pub trait StatusSource {
    /// Error type returned by failed status fetches.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetches the current status string for the watched resource.
    fn fetch_status(&self) -> SourceFuture<'_, String, Self::Error>;
}

impl<S: StatusSource> StatusSource for &S {
    type Error = S::Error;

    fn fetch_status(&self) -> SourceFuture<'_, String, Self::Error> {
        S::fetch_status(*self)
    }
}

/// Adapter turning a plain closure into a [`StatusSource`].
///
/// Useful for one-off waits and tests where a dedicated source type would be
/// overkill.
#[derive(Clone, Debug)]
pub struct FnStatusSource<F> {
    fetch: F,
}

impl<F> FnStatusSource<F> {
    /// Wraps `fetch` so it can drive a progression wait.
    #[must_use]
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

impl<F, Fut, E> StatusSource for FnStatusSource<F>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<String, E>> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn fetch_status(&self) -> SourceFuture<'_, String, Self::Error> {
        Box::pin((self.fetch)())
    }
}
