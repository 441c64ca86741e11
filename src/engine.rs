//! Per-screen view-model engine.
//!
//! A [`ViewModel`] owns one [`StateStore`], one [`EventChannel`], an action
//! mailbox and a cancellable [`Scope`]. Screen behaviour lives in an
//! [`ActionHandler`]; the engine only wires it together:
//!
//! ```text
//! dispatch(action) ──→ mailbox task ──→ handler.handle_action(action, ctx)
//!                                                │
//!                        ctx.launch(fetch) ◀─────┘
//!                                │
//!          use case stream ──→ collector ──→ ctx.reduce / ctx.dispatch_event
//! ```
//!
//! Actions are handled one at a time, in dispatch order. Work that must run
//! concurrently (two lists fetched at once) is started with
//! [`EngineContext::launch`] and still funnels every state change through
//! the store's serialized reducers.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;
use tokio::sync::mpsc;
use tracing::Instrument;
use uuid::Uuid;

use crate::events::{EventChannel, EventStream};
use crate::mvi::{Action, Event, UiState};
use crate::scope::Scope;
use crate::store::StateStore;

/// Screen-specific transition logic plugged into a [`ViewModel`].
#[async_trait]
pub trait ActionHandler: Send + Sync + 'static {
    type State: UiState;
    type Action: Action;
    type Event: Event;

    /// Name used in log records.
    fn name(&self) -> &'static str;

    /// Construction-time work, run once before the first action.
    async fn on_start(&self, _ctx: &EngineContext<Self::State, Self::Event>) {}

    /// Process one action. Runs on the mailbox task; long fetches should be
    /// launched on the context so the mailbox keeps draining.
    async fn handle_action(
        &self,
        action: Self::Action,
        ctx: &EngineContext<Self::State, Self::Event>,
    );
}

/// Handle given to handlers for reading and updating engine state.
pub struct EngineContext<S: UiState, E: Event> {
    store: Arc<StateStore<S>>,
    events: Arc<EventChannel<E>>,
    scope: Scope,
    id: Uuid,
}

impl<S: UiState, E: Event> Clone for EngineContext<S, E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            events: Arc::clone(&self.events),
            scope: self.scope.clone(),
            id: self.id,
        }
    }
}

impl<S: UiState, E: Event> EngineContext<S, E> {
    pub fn current(&self) -> S {
        self.store.current()
    }

    /// Replace the whole state.
    pub fn update_state(&self, next: S) -> bool {
        self.store.replace(next)
    }

    /// Compute the next state from the latest one, atomically.
    pub fn reduce<F>(&self, reducer: F) -> bool
    where
        F: FnOnce(&S) -> S,
    {
        self.store.reduce(reducer)
    }

    pub fn reduce_with<F, R>(&self, reducer: F) -> Option<R>
    where
        F: FnOnce(&S) -> (S, R),
    {
        self.store.reduce_with(reducer)
    }

    pub fn dispatch_event(&self, event: E) -> bool {
        self.events.emit(event)
    }

    /// Run `fut` concurrently inside the engine's scope.
    pub fn launch<F>(&self, fut: F) -> bool
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let span = tracing::debug_span!("engine_task", engine = %self.id);
        self.scope.launch(fut.instrument(span))
    }

    pub fn is_cancelled(&self) -> bool {
        self.scope.is_cancelled()
    }
}

/// The per-screen orchestrator.
pub struct ViewModel<H: ActionHandler> {
    handler: Arc<H>,
    ctx: EngineContext<H::State, H::Event>,
    actions: mpsc::UnboundedSender<H::Action>,
}

impl<H: ActionHandler> ViewModel<H> {
    /// Build the engine and start its mailbox. Must be called inside a
    /// tokio runtime.
    pub fn new(handler: H, initial: H::State) -> Self {
        let id = Uuid::new_v4();
        let handler = Arc::new(handler);
        let scope = Scope::new(format!("{}-{}", handler.name(), id));
        let store = Arc::new(StateStore::new(initial));
        let events = Arc::new(EventChannel::new());

        {
            let store = Arc::clone(&store);
            let events = Arc::clone(&events);
            scope.on_cancel(move || {
                store.close();
                events.close();
            });
        }

        let ctx = EngineContext {
            store,
            events,
            scope,
            id,
        };

        let (actions, receiver) = mpsc::unbounded_channel();
        let span = tracing::info_span!("view_model", screen = handler.name(), engine = %id);
        ctx.scope
            .launch(run_mailbox(Arc::clone(&handler), ctx.clone(), receiver).instrument(span));

        tracing::debug!(screen = handler.name(), engine = %id, "View model created");
        Self {
            handler,
            ctx,
            actions,
        }
    }

    /// Queue `action` for the handler. Never blocks.
    pub fn dispatch(&self, action: H::Action) {
        if self.ctx.scope.is_cancelled() {
            tracing::warn!(
                screen = self.handler.name(),
                engine = %self.ctx.id,
                ?action,
                "Dispatch on cancelled view model dropped"
            );
            return;
        }
        if let Err(mpsc::error::SendError(action)) = self.actions.send(action) {
            tracing::warn!(
                screen = self.handler.name(),
                ?action,
                "Mailbox closed, action dropped"
            );
        }
    }

    pub fn state(&self) -> H::State {
        self.ctx.current()
    }

    pub fn observe_state(&self) -> BoxStream<'static, H::State> {
        self.ctx.store.observe()
    }

    pub fn observe_events(&self) -> EventStream<H::Event> {
        self.ctx.events.observe()
    }

    pub fn update_state(&self, next: H::State) -> bool {
        self.ctx.update_state(next)
    }

    pub fn dispatch_event(&self, event: H::Event) -> bool {
        self.ctx.dispatch_event(event)
    }

    pub fn context(&self) -> EngineContext<H::State, H::Event> {
        self.ctx.clone()
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Tear the engine down. In-flight work stops and no state replacement
    /// lands after this returns. The engine cannot be restarted.
    pub fn cancel(&self) {
        self.ctx.scope.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.ctx.scope.is_cancelled()
    }

    pub fn id(&self) -> Uuid {
        self.ctx.id
    }
}

impl<H: ActionHandler> Drop for ViewModel<H> {
    fn drop(&mut self) {
        self.ctx.scope.cancel();
    }
}

impl<H: ActionHandler> fmt::Debug for ViewModel<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewModel")
            .field("screen", &self.handler.name())
            .field("id", &self.ctx.id)
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

async fn run_mailbox<H: ActionHandler>(
    handler: Arc<H>,
    ctx: EngineContext<H::State, H::Event>,
    mut receiver: mpsc::UnboundedReceiver<H::Action>,
) {
    handler.on_start(&ctx).await;
    while let Some(action) = receiver.recv().await {
        tracing::debug!(?action, "Handling action");
        handler.handle_action(action, &ctx).await;
    }
}
