//! Pure state transitions of the home screen.

use crate::domain::MovieListEntity;
use crate::model::Movie;
use crate::mvi::Reducer;
use crate::screen::LoadState;

use super::state::{HomeState, MovieList};

/// Inputs the home reducer folds into state.
#[derive(Debug, Clone)]
pub enum HomeMutation {
    /// A fetch for `list` is starting; reserves its next free page.
    PageRequested { list: MovieList },
    /// The fetch for `requested` produced a page.
    PageLoaded {
        list: MovieList,
        requested: u32,
        entity: MovieListEntity,
    },
    /// The fetch for `requested` failed.
    PageFailed { list: MovieList, requested: u32 },
    /// The fetch for `requested` ended without a result; frees the page.
    PageAbandoned { list: MovieList, requested: u32 },
    KeywordChanged { keyword: String },
}

pub struct HomeReducer;

impl Reducer for HomeReducer {
    type State = HomeState;
    type Input = HomeMutation;

    fn reduce(state: &HomeState, input: HomeMutation) -> HomeState {
        match input {
            HomeMutation::PageRequested { list } => {
                let (reserved, _) = state.list(list).reserve();
                HomeState {
                    load_state: LoadState::Loading,
                    ..state.with_list(list, reserved)
                }
            }
            HomeMutation::PageLoaded {
                list,
                requested,
                entity,
            } => {
                // The source's page number wins; fall back to what we asked for.
                let page = entity.page.unwrap_or(requested);
                let movies = entity.results.iter().map(Movie::from_entity).collect();
                let (merged, outcome) = state.list(list).release(requested).with_page(page, movies);
                tracing::debug!(%list, page, ?outcome, "Movie list page merged");
                HomeState {
                    load_state: LoadState::Idle,
                    ..state.with_list(list, merged)
                }
            }
            HomeMutation::PageFailed { list, requested } => HomeState {
                load_state: LoadState::Failed,
                ..state.with_list(list, state.list(list).fail(requested))
            },
            HomeMutation::PageAbandoned { list, requested } => {
                let released = state.list(list).release(requested);
                let load_state = match state.load_state {
                    LoadState::Loading => LoadState::Idle,
                    other => other,
                };
                HomeState {
                    load_state,
                    ..state.with_list(list, released)
                }
            }
            HomeMutation::KeywordChanged { keyword } => {
                let keyword = keyword.trim();
                HomeState {
                    keyword: (!keyword.is_empty()).then(|| keyword.to_string()),
                    ..state.clone()
                }
            }
        }
    }
}
