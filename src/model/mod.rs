//! UI-facing representations of domain entities.

mod movie;
mod movie_detail;

pub use movie::Movie;
pub use movie_detail::{Genre, MovieDetail};
