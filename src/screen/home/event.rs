use crate::mvi::Event;

use super::state::MovieList;

#[derive(Debug, Clone, PartialEq)]
pub enum HomeEvent {
    /// A list page could not be loaded; shown as a transient message.
    FetchMovieListFailed { list: MovieList, message: String },
}

impl Event for HomeEvent {}
