//! Home screen action handling.

use std::sync::Arc;

use async_trait::async_trait;

use crate::collector::ResultStreamExt;
use crate::domain::{MovieListEntity, PageParams, UseCase};
use crate::engine::{ActionHandler, EngineContext, ViewModel};
use crate::mvi::Reducer;

use super::action::HomeAction;
use super::event::HomeEvent;
use super::reducer::{HomeMutation, HomeReducer};
use super::state::{HomeState, MovieList};

/// Any use case serving a paged movie listing.
pub type MovieListUseCase = dyn UseCase<Params = PageParams, Output = MovieListEntity>;

pub type HomeViewModel = ViewModel<HomeHandler>;

type HomeContext = EngineContext<HomeState, HomeEvent>;

pub struct HomeHandler {
    upcoming: Arc<MovieListUseCase>,
    popular: Arc<MovieListUseCase>,
    prefetch: bool,
}

impl HomeHandler {
    pub fn new(upcoming: Arc<MovieListUseCase>, popular: Arc<MovieListUseCase>) -> Self {
        Self {
            upcoming,
            popular,
            prefetch: true,
        }
    }

    /// Whether both lists load their first page when the engine starts.
    pub fn with_prefetch(mut self, prefetch: bool) -> Self {
        self.prefetch = prefetch;
        self
    }

    fn use_case(&self, list: MovieList) -> Arc<MovieListUseCase> {
        match list {
            MovieList::UpComing => Arc::clone(&self.upcoming),
            MovieList::Popular => Arc::clone(&self.popular),
        }
    }

    /// Start loading the next page of `list` in the background.
    pub fn fetch_movie_list(&self, list: MovieList, ctx: &HomeContext) {
        let use_case = self.use_case(list);
        let task_ctx = ctx.clone();
        ctx.launch(async move { fetch_page(use_case, list, task_ctx).await });
    }
}

async fn fetch_page(use_case: Arc<MovieListUseCase>, list: MovieList, ctx: HomeContext) {
    let reserved = ctx.reduce_with(|state| {
        let page = state.list(list).next_request_page();
        (
            HomeReducer::reduce(state, HomeMutation::PageRequested { list }),
            page,
        )
    });
    let Some(page) = reserved else {
        return;
    };
    tracing::debug!(%list, page, "Fetching movie list page");

    let emitted = use_case
        .invoke(PageParams { page })
        .collect_with_callback(
            |entity: MovieListEntity| {
                ctx.reduce(move |state| {
                    HomeReducer::reduce(
                        state,
                        HomeMutation::PageLoaded {
                            list,
                            requested: page,
                            entity,
                        },
                    )
                });
            },
            |message: String| {
                tracing::warn!(%list, page, %message, "Movie list fetch failed");
                ctx.reduce(|state| {
                    HomeReducer::reduce(state, HomeMutation::PageFailed { list, requested: page })
                });
                ctx.dispatch_event(HomeEvent::FetchMovieListFailed { list, message });
            },
        )
        .await;

    if emitted == 0 {
        tracing::debug!(%list, page, "Movie list fetch produced nothing, releasing page");
        ctx.reduce(|state| {
            HomeReducer::reduce(state, HomeMutation::PageAbandoned { list, requested: page })
        });
    }
}

#[async_trait]
impl ActionHandler for HomeHandler {
    type State = HomeState;
    type Action = HomeAction;
    type Event = HomeEvent;

    fn name(&self) -> &'static str {
        "home"
    }

    async fn on_start(&self, ctx: &HomeContext) {
        if self.prefetch {
            self.fetch_movie_list(MovieList::UpComing, ctx);
            self.fetch_movie_list(MovieList::Popular, ctx);
        }
    }

    async fn handle_action(&self, action: HomeAction, ctx: &HomeContext) {
        match action {
            HomeAction::FetchUpComingMovieList => self.fetch_movie_list(MovieList::UpComing, ctx),
            HomeAction::FetchPopularMovieList => self.fetch_movie_list(MovieList::Popular, ctx),
            HomeAction::Search { keyword } => {
                ctx.reduce(|state| HomeReducer::reduce(state, HomeMutation::KeywordChanged { keyword }));
            }
        }
    }
}

impl ViewModel<HomeHandler> {
    pub fn home(handler: HomeHandler) -> Self {
        Self::new(handler, HomeState::initial())
    }

    pub fn fetch_upcoming_movie_list(&self) {
        self.handler()
            .fetch_movie_list(MovieList::UpComing, &self.context());
    }

    pub fn fetch_popular_movie_list(&self) {
        self.handler().fetch_movie_list(MovieList::Popular, &self.context());
    }

    pub fn search_keyword(&self, keyword: impl Into<String>) {
        self.dispatch(HomeAction::Search {
            keyword: keyword.into(),
        });
    }
}
