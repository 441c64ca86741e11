//! Home screen: upcoming and popular movie lists plus keyword search.

mod action;
mod event;
mod handler;
mod reducer;
mod state;

pub use action::HomeAction;
pub use event::HomeEvent;
pub use handler::{HomeHandler, HomeViewModel, MovieListUseCase};
pub use reducer::{HomeMutation, HomeReducer};
pub use state::{HomeState, MovieList};
