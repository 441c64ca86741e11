use crate::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum HomeAction {
    /// Load the next page of upcoming movies.
    FetchUpComingMovieList,
    /// Load the next page of popular movies.
    FetchPopularMovieList,
    /// Filter the loaded movies by title. An empty keyword clears the search.
    Search { keyword: String },
}

impl Action for HomeAction {}
