use crate::mvi::Event;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailEvent {
    FetchMovieDetailFailed { movie_id: i32, message: String },
}

impl Event for DetailEvent {}
