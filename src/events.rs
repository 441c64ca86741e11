//! One-shot event channel.
//!
//! Lossy by contract: an event emitted while nobody observes is dropped,
//! and an observer attached later never sees it. At most one observation is
//! active; attaching a new observer detaches the previous one.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::mvi::Event;

pub struct EventChannel<E: Event> {
    observer: Mutex<ObserverSlot<E>>,
}

struct ObserverSlot<E> {
    sender: Option<mpsc::UnboundedSender<E>>,
    closed: bool,
}

impl<E: Event> EventChannel<E> {
    pub fn new() -> Self {
        Self {
            observer: Mutex::new(ObserverSlot {
                sender: None,
                closed: false,
            }),
        }
    }

    /// Deliver `event` to the active observer, if any. Returns whether it
    /// was handed over.
    pub fn emit(&self, event: E) -> bool {
        let mut slot = self.observer.lock();
        let Some(sender) = slot.sender.as_ref() else {
            tracing::debug!(?event, "No event observer, dropping event");
            return false;
        };
        match sender.send(event) {
            Ok(()) => true,
            Err(mpsc::error::SendError(event)) => {
                // Observer went away since the last emission.
                slot.sender = None;
                tracing::debug!(?event, "Event observer gone, dropping event");
                false
            }
        }
    }

    /// Start observing. Supersedes any earlier observation, which ends.
    pub fn observe(&self) -> EventStream<E> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut slot = self.observer.lock();
        if slot.closed {
            return EventStream { receiver: None };
        }
        slot.sender = Some(sender);
        EventStream {
            receiver: Some(receiver),
        }
    }

    pub fn has_observer(&self) -> bool {
        self.observer
            .lock()
            .sender
            .as_ref()
            .is_some_and(|s| !s.is_closed())
    }

    /// Detach the observer and refuse new ones.
    pub fn close(&self) {
        let mut slot = self.observer.lock();
        slot.closed = true;
        slot.sender = None;
    }
}

impl<E: Event> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Stream side of one observation of an [`EventChannel`].
pub struct EventStream<E> {
    receiver: Option<mpsc::UnboundedReceiver<E>>,
}

impl<E> Stream for EventStream<E> {
    type Item = E;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<E>> {
        match self.receiver.as_mut() {
            Some(receiver) => receiver.poll_recv(cx),
            None => Poll::Ready(None),
        }
    }
}
