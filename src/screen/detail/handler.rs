use std::sync::Arc;

use async_trait::async_trait;

use crate::collector::ResultStreamExt;
use crate::domain::{MovieDetailBundle, MovieDetailParams, UseCase};
use crate::engine::{ActionHandler, EngineContext, ViewModel};
use crate::mvi::Reducer;

use super::action::DetailAction;
use super::event::DetailEvent;
use super::reducer::{DetailMutation, DetailReducer};
use super::state::DetailState;

pub type MovieDetailUseCase = dyn UseCase<Params = MovieDetailParams, Output = MovieDetailBundle>;

pub type DetailViewModel = ViewModel<DetailHandler>;

type DetailContext = EngineContext<DetailState, DetailEvent>;

pub struct DetailHandler {
    fetch_movie_detail: Arc<MovieDetailUseCase>,
}

impl DetailHandler {
    pub fn new(fetch_movie_detail: Arc<MovieDetailUseCase>) -> Self {
        Self { fetch_movie_detail }
    }

    pub fn fetch_movie_detail(&self, movie_id: i32, ctx: &DetailContext) {
        let use_case = Arc::clone(&self.fetch_movie_detail);
        let task_ctx = ctx.clone();
        ctx.launch(async move { fetch_detail(use_case, movie_id, task_ctx).await });
    }
}

async fn fetch_detail(use_case: Arc<MovieDetailUseCase>, movie_id: i32, ctx: DetailContext) {
    if ctx.is_cancelled() {
        return;
    }
    ctx.reduce(|state| DetailReducer::reduce(state, DetailMutation::Requested));
    tracing::debug!(movie_id, "Fetching movie detail");

    let emitted = use_case
        .invoke(MovieDetailParams { movie_id })
        .collect_with_callback(
            |bundle: MovieDetailBundle| {
                ctx.reduce(move |state| {
                    DetailReducer::reduce(state, DetailMutation::Loaded { bundle })
                });
            },
            |message: String| {
                tracing::warn!(movie_id, %message, "Movie detail fetch failed");
                ctx.reduce(|state| DetailReducer::reduce(state, DetailMutation::Failed));
                ctx.dispatch_event(DetailEvent::FetchMovieDetailFailed { movie_id, message });
            },
        )
        .await;

    if emitted == 0 {
        ctx.reduce(|state| DetailReducer::reduce(state, DetailMutation::Abandoned));
    }
}

#[async_trait]
impl ActionHandler for DetailHandler {
    type State = DetailState;
    type Action = DetailAction;
    type Event = DetailEvent;

    fn name(&self) -> &'static str {
        "detail"
    }

    async fn handle_action(&self, action: DetailAction, ctx: &DetailContext) {
        match action {
            DetailAction::FetchMovieDetail { movie_id } => self.fetch_movie_detail(movie_id, ctx),
        }
    }
}

impl ViewModel<DetailHandler> {
    pub fn detail(handler: DetailHandler) -> Self {
        Self::new(handler, DetailState::default())
    }

    pub fn fetch_movie_detail(&self, movie_id: i32) {
        self.handler().fetch_movie_detail(movie_id, &self.context());
    }
}
