use crate::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailAction {
    FetchMovieDetail { movie_id: i32 },
}

impl Action for DetailAction {}
