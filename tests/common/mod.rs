//! Shared test utilities and mock use cases.

#![allow(dead_code, unused_imports)]

use futures::stream::{self, BoxStream};
use futures::StreamExt;
use moviedeck::collector::FetchResult;
use moviedeck::domain::{MovieEntity, MovieListEntity, UseCase};
use moviedeck::engine::{ActionHandler, ViewModel};
use parking_lot::Mutex;
use std::time::Duration;
use tokio::sync::oneshot;

pub const WAIT: Duration = Duration::from_secs(2);

struct PendingCall<P, T> {
    params: P,
    responder: Option<oneshot::Sender<FetchResult<T>>>,
}

/// Use case whose calls stay pending until the test answers them.
///
/// Lets a test decide exactly when, and in which order, concurrent
/// fetches complete.
pub struct GatedUseCase<P, T> {
    calls: Mutex<Vec<PendingCall<P, T>>>,
}

impl<P: Clone + Send + 'static, T: Send + 'static> GatedUseCase<P, T> {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn params(&self, index: usize) -> P {
        self.calls.lock()[index].params.clone()
    }

    /// Answer call `index`. Returns false if it was already answered or the
    /// caller is gone.
    pub fn respond(&self, index: usize, result: FetchResult<T>) -> bool {
        let responder = self.calls.lock()[index].responder.take();
        match responder {
            Some(tx) => tx.send(result).is_ok(),
            None => false,
        }
    }

    /// End call `index` with no emission.
    pub fn abandon(&self, index: usize) {
        self.calls.lock()[index].responder.take();
    }

    /// Wait until at least `count` calls arrived.
    pub async fn wait_for_calls(&self, count: usize) {
        tokio::time::timeout(WAIT, async {
            while self.call_count() < count {
                tokio::time::sleep(Duration::from_millis(2)).await;
            }
        })
        .await
        .unwrap_or_else(|_| panic!("expected {} use case calls, got {}", count, self.call_count()));
    }
}

impl<P, T> UseCase for GatedUseCase<P, T>
where
    P: Clone + Send + Sync + 'static,
    T: Send + 'static,
{
    type Params = P;
    type Output = T;

    fn invoke(&self, params: P) -> BoxStream<'static, FetchResult<T>> {
        let (tx, rx) = oneshot::channel();
        self.calls.lock().push(PendingCall {
            params,
            responder: Some(tx),
        });
        stream::once(rx).filter_map(|answer| async move { answer.ok() }).boxed()
    }
}

/// Use case answering every call immediately through a closure.
pub struct FnUseCase<P, T> {
    respond: Box<dyn Fn(P) -> Vec<FetchResult<T>> + Send + Sync>,
}

impl<P, T> FnUseCase<P, T> {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(P) -> Vec<FetchResult<T>> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
        }
    }
}

impl<P, T> UseCase for FnUseCase<P, T>
where
    P: Send + 'static,
    T: Send + 'static,
{
    type Params = P;
    type Output = T;

    fn invoke(&self, params: P) -> BoxStream<'static, FetchResult<T>> {
        stream::iter((self.respond)(params)).boxed()
    }
}

pub fn movie(id: i32, title: &str) -> MovieEntity {
    MovieEntity {
        id: Some(id),
        title: Some(title.to_string()),
        ..Default::default()
    }
}

pub fn movie_page(page: u32, movies: Vec<MovieEntity>) -> MovieListEntity {
    MovieListEntity {
        page: Some(page),
        results: movies,
        total_pages: None,
        total_results: None,
    }
}

/// Wait until the view model's state satisfies `done`.
pub async fn wait_until<H, P>(vm: &ViewModel<H>, mut done: P) -> H::State
where
    H: ActionHandler,
    P: FnMut(&H::State) -> bool,
{
    let mut states = vm.observe_state();
    tokio::time::timeout(WAIT, async {
        while let Some(state) = states.next().await {
            if done(&state) {
                return state;
            }
        }
        panic!("state stream ended before condition was met");
    })
    .await
    .expect("timed out waiting for state")
}

/// Let spawned tasks run to their next suspension point.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}
