//! Detail screen: one movie and its recommendations.

mod action;
mod event;
mod handler;
mod reducer;
mod state;

pub use action::DetailAction;
pub use event::DetailEvent;
pub use handler::{DetailHandler, DetailViewModel, MovieDetailUseCase};
pub use reducer::{DetailMutation, DetailReducer};
pub use state::DetailState;
