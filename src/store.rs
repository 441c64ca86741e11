//! Observable state container.
//!
//! Holds exactly one immutable snapshot per screen. Every mutation is a
//! whole-snapshot replacement computed by a reducer while the container's
//! write lock is held, so concurrent writers can never lose each other's
//! updates and observers only ever see complete snapshots.

use futures::stream::{self, BoxStream};
use futures::StreamExt;
use tokio::sync::watch;

use crate::mvi::UiState;
use crate::scope::Cancellation;

/// Thread-safe, observable holder of the latest state snapshot.
pub struct StateStore<S: UiState> {
    sender: watch::Sender<S>,
    closed: Cancellation,
}

impl<S: UiState> StateStore<S> {
    pub fn new(initial: S) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender,
            closed: Cancellation::new(),
        }
    }

    /// Latest snapshot.
    pub fn current(&self) -> S {
        self.sender.borrow().clone()
    }

    /// Swap in `next` wholesale and notify current observers. Returns
    /// false once the store is closed.
    ///
    /// Replacing with a state equal to the current one publishes nothing;
    /// observers already hold that snapshot.
    pub fn replace(&self, next: S) -> bool {
        self.reduce(move |_| next)
    }

    /// Apply `reducer` to the latest snapshot and publish the result.
    ///
    /// The read-compute-write runs under the store's write lock, so the
    /// reducer always sees the snapshot left by the previous writer. The
    /// reducer must not call back into this store. A reducer returning a
    /// state equal to the current one publishes nothing.
    pub fn reduce<F>(&self, reducer: F) -> bool
    where
        F: FnOnce(&S) -> S,
    {
        self.reduce_with(|state| (reducer(state), ())).is_some()
    }

    /// Like [`reduce`](Self::reduce), also returning a value computed from
    /// the same snapshot. `None` means the store is closed and nothing ran.
    pub fn reduce_with<F, R>(&self, reducer: F) -> Option<R>
    where
        F: FnOnce(&S) -> (S, R),
    {
        let mut output = None;
        self.sender.send_if_modified(|state| {
            if self.closed.is_cancelled() {
                return false;
            }
            let (next, value) = reducer(state);
            output = Some(value);
            if next == *state {
                return false;
            }
            *state = next;
            true
        });
        output
    }

    /// Hot stream: yields the current snapshot, then each later one.
    ///
    /// Observers that fall behind see only the most recent snapshot. The
    /// stream ends when the store closes; observing a closed store yields
    /// nothing.
    pub fn observe(&self) -> BoxStream<'static, S> {
        if self.closed.is_cancelled() {
            return stream::empty().boxed();
        }
        let receiver = self.sender.subscribe();
        let closed = self.closed.clone();
        stream::unfold(
            (receiver, closed, true),
            |(mut receiver, closed, first)| async move {
                if closed.is_cancelled() {
                    return None;
                }
                if first {
                    let snapshot = receiver.borrow_and_update().clone();
                    return Some((snapshot, (receiver, closed, false)));
                }
                tokio::select! {
                    biased;
                    _ = closed.cancelled() => None,
                    changed = receiver.changed() => {
                        changed.ok()?;
                        if closed.is_cancelled() {
                            return None;
                        }
                        let snapshot = receiver.borrow_and_update().clone();
                        Some((snapshot, (receiver, closed, false)))
                    }
                }
            },
        )
        .boxed()
    }

    /// Reject all further replacements and end open observations.
    pub fn close(&self) {
        // Flip the flag under the write lock so that no reducer can commit
        // after close() returns.
        self.sender.send_if_modified(|_| {
            self.closed.cancel();
            false
        });
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    pub fn observer_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
