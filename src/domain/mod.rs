//! Contracts of the data layer the state core consumes.
//!
//! Entities arrive exactly as the remote source describes them, every field
//! optional. Use cases turn a params value into a result stream.

mod catalog;
mod entity;
mod usecase;

pub use catalog::{
    Catalog, CatalogError, CatalogUseCases, FetchMovieDetail, FetchPopularMovieList,
    FetchUpComingMovieList,
};
pub use entity::{GenreEntity, MovieDetailBundle, MovieDetailEntity, MovieEntity, MovieListEntity};
pub use usecase::{MovieDetailParams, PageParams, UseCase};
