//! Cancellable task scope owned by each engine.
//!
//! All asynchronous work an engine starts runs inside its [`Scope`]. When
//! the scope is cancelled every task is stopped at its next suspension
//! point, registered hooks run once, and nothing launched afterwards runs.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// One-way cancellation flag that can be awaited.
#[derive(Clone, Default)]
pub struct Cancellation {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the flag. Returns true only for the call that actually cancelled.
    pub fn cancel(&self) -> bool {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.notify.notify_waiters();
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub async fn cancelled(&self) {
        // Register with Notify BEFORE checking the flag, otherwise a cancel()
        // between the check and the await would be missed.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

type CancelHook = Box<dyn FnOnce() + Send>;

/// Task scope with structured cancellation.
#[derive(Clone)]
pub struct Scope {
    inner: Arc<ScopeInner>,
}

struct ScopeInner {
    name: String,
    cancellation: Cancellation,
    handles: Mutex<Vec<JoinHandle<()>>>,
    hooks: Mutex<Vec<CancelHook>>,
}

impl Scope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ScopeInner {
                name: name.into(),
                cancellation: Cancellation::new(),
                handles: Mutex::new(Vec::new()),
                hooks: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Run `fut` on the runtime until it completes or the scope is cancelled.
    ///
    /// A panic inside `fut` is treated as fatal to the scope: it is logged
    /// and the whole scope is cancelled. Returns false when the scope is
    /// already cancelled and nothing was spawned.
    pub fn launch<F>(&self, fut: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_cancelled() {
            tracing::debug!(scope = %self.inner.name, "Launch on cancelled scope ignored");
            return false;
        }

        let scope = self.clone();
        let cancellation = self.inner.cancellation.clone();
        let handle = tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = cancellation.cancelled() => return,
                outcome = AssertUnwindSafe(fut).catch_unwind() => outcome,
            };
            if outcome.is_err() {
                tracing::error!(scope = %scope.name(), "Task panicked, cancelling scope");
                scope.cancel();
            }
        });

        let mut handles = self.inner.handles.lock();
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
        true
    }

    /// Register a hook that runs once, synchronously, when the scope is
    /// cancelled. Runs immediately if the scope is already cancelled.
    pub fn on_cancel<F>(&self, hook: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut hooks = self.inner.hooks.lock();
        if self.is_cancelled() {
            drop(hooks);
            hook();
            return;
        }
        hooks.push(Box::new(hook));
    }

    /// Cancel the scope. Idempotent.
    pub fn cancel(&self) {
        // Taking the hooks lock first orders cancel() against on_cancel().
        let hooks: Vec<CancelHook> = {
            let mut guard = self.inner.hooks.lock();
            if !self.inner.cancellation.cancel() {
                return;
            }
            guard.drain(..).collect()
        };
        for hook in hooks {
            hook();
        }
        let handles: Vec<JoinHandle<()>> = self.inner.handles.lock().drain(..).collect();
        let in_flight = handles.len();
        for handle in handles {
            handle.abort();
        }
        tracing::debug!(scope = %self.inner.name, in_flight, "Scope cancelled");
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancellation.is_cancelled()
    }

    pub async fn cancelled(&self) {
        self.inner.cancellation.cancelled().await
    }
}
