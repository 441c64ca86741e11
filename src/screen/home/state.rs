use std::collections::HashSet;

use crate::model::Movie;
use crate::mvi::UiState;
use crate::pagination::PaginatedList;
use crate::screen::LoadState;

/// Which of the home screen's lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieList {
    UpComing,
    Popular,
}

impl std::fmt::Display for MovieList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovieList::UpComing => write!(f, "upcoming"),
            MovieList::Popular => write!(f, "popular"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeState {
    pub load_state: LoadState,
    pub upcoming: PaginatedList<Movie>,
    pub popular: PaginatedList<Movie>,
    /// Active search keyword, if any.
    pub keyword: Option<String>,
}

impl UiState for HomeState {}

impl HomeState {
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn list(&self, list: MovieList) -> &PaginatedList<Movie> {
        match list {
            MovieList::UpComing => &self.upcoming,
            MovieList::Popular => &self.popular,
        }
    }

    /// Copy of this state with `list` replaced.
    pub fn with_list(&self, list: MovieList, value: PaginatedList<Movie>) -> Self {
        let mut next = self.clone();
        match list {
            MovieList::UpComing => next.upcoming = value,
            MovieList::Popular => next.popular = value,
        }
        next
    }

    /// Loaded movies matching the keyword, upcoming first, each id once.
    pub fn search_results(&self) -> Vec<&Movie> {
        let Some(keyword) = self.keyword.as_deref() else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        self.upcoming
            .items()
            .iter()
            .chain(self.popular.items())
            .filter(|movie| movie.matches_keyword(keyword))
            .filter(|movie| movie.id.map_or(true, |id| seen.insert(id)))
            .collect()
    }
}
