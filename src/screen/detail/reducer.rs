use crate::domain::MovieDetailBundle;
use crate::model::{Movie, MovieDetail};
use crate::mvi::Reducer;
use crate::pagination::{PaginatedList, FIRST_PAGE};
use crate::screen::LoadState;

use super::state::DetailState;

#[derive(Debug, Clone)]
pub enum DetailMutation {
    Requested,
    Loaded { bundle: MovieDetailBundle },
    Failed,
    /// The fetch ended without a result.
    Abandoned,
}

pub struct DetailReducer;

impl Reducer for DetailReducer {
    type State = DetailState;
    type Input = DetailMutation;

    fn reduce(state: &DetailState, input: DetailMutation) -> DetailState {
        match input {
            DetailMutation::Requested => DetailState {
                load_state: LoadState::Loading,
                ..state.clone()
            },
            DetailMutation::Loaded { bundle } => {
                let page = bundle.recommendations.page.unwrap_or(FIRST_PAGE);
                let movies = bundle
                    .recommendations
                    .results
                    .iter()
                    .map(Movie::from_entity)
                    .collect();
                // Recommendations belong to one movie; a different target starts over.
                let accumulated = if bundle.detail.id == state.target_movie.id {
                    state.recommendations.clone()
                } else {
                    PaginatedList::new()
                };
                let (recommendations, _) = accumulated.with_page(page, movies);
                DetailState {
                    load_state: LoadState::Idle,
                    target_movie: MovieDetail::from_entity(&bundle.detail),
                    recommendations,
                }
            }
            DetailMutation::Failed => DetailState {
                load_state: LoadState::Failed,
                ..state.clone()
            },
            DetailMutation::Abandoned => DetailState {
                load_state: LoadState::Idle,
                ..state.clone()
            },
        }
    }
}
