use crate::model::{Movie, MovieDetail};
use crate::mvi::UiState;
use crate::pagination::PaginatedList;
use crate::screen::LoadState;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailState {
    pub load_state: LoadState,
    pub target_movie: MovieDetail,
    pub recommendations: PaginatedList<Movie>,
}

impl UiState for DetailState {}
