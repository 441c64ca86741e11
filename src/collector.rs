//! Routing of use-case result streams into success/failure callbacks.
//!
//! Every use case yields a stream of [`FetchResult`]. The collector drains
//! that stream in order and hands each emission to exactly one callback.
//! Data-fetch failures stop here: they reach `on_failure` as a plain reason
//! and never escape into the owning scope.

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use thiserror::Error;

/// The only error kind the state core models. Always recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// A use case could not produce its data.
    #[error("Data fetch failed: {reason}")]
    DataFetch { reason: String },
}

impl FetchError {
    pub fn data_fetch(reason: impl Into<String>) -> Self {
        FetchError::DataFetch {
            reason: reason.into(),
        }
    }

    /// Human-readable reason, suitable for a transient notification.
    pub fn reason(&self) -> &str {
        match self {
            FetchError::DataFetch { reason } => reason,
        }
    }
}

/// Uniform shape of every use-case emission.
pub type FetchResult<T> = Result<T, FetchError>;

/// Extension for draining a result stream into callbacks.
#[async_trait]
pub trait ResultStreamExt<T>: Stream<Item = FetchResult<T>> + Send + Unpin + Sized
where
    T: Send + 'static,
{
    /// Collect the stream until it completes.
    ///
    /// Each emission invokes exactly one callback, synchronously, before the
    /// next emission is polled. Callback panics are not caught here.
    /// Cancelling the future that drives this call releases the stream and
    /// no further callbacks run. Returns how many emissions were routed.
    async fn collect_with_callback<S, F>(mut self, mut on_success: S, mut on_failure: F) -> usize
    where
        S: FnMut(T) + Send,
        F: FnMut(String) + Send,
    {
        let mut emitted = 0usize;
        while let Some(result) = self.next().await {
            emitted += 1;
            match result {
                Ok(value) => on_success(value),
                Err(err) => {
                    tracing::debug!(error = %err, "Use case emitted a failure");
                    on_failure(err.reason().to_string());
                }
            }
        }
        tracing::trace!(emitted, "Result stream completed");
        emitted
    }
}

impl<T, St> ResultStreamExt<T> for St
where
    T: Send + 'static,
    St: Stream<Item = FetchResult<T>> + Send + Unpin,
{
}
