//! Fixture-backed data source.
//!
//! Serves the three movie use cases from a JSON document instead of a
//! remote API. Used by the binary and by integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, BoxStream};
use futures::StreamExt;
use serde::Deserialize;
use thiserror::Error;

use crate::collector::{FetchError, FetchResult};
use crate::domain::entity::{MovieDetailBundle, MovieDetailEntity, MovieEntity, MovieListEntity};
use crate::domain::usecase::{MovieDetailParams, PageParams, UseCase};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Movie data keyed the way the use cases ask for it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// Upcoming listing, one entry per page starting at page 1.
    pub upcoming: Vec<Vec<MovieEntity>>,
    /// Popular listing, one entry per page starting at page 1.
    pub popular: Vec<Vec<MovieEntity>>,
    pub details: Vec<MovieDetailEntity>,
    /// Recommendations per movie id (JSON object keys are strings).
    pub recommendations: std::collections::HashMap<String, Vec<MovieEntity>>,
}

impl Catalog {
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    fn page_of(pages: &[Vec<MovieEntity>], page: u32) -> FetchResult<MovieListEntity> {
        let total_pages = pages.len() as u32;
        let results = page
            .checked_sub(1)
            .and_then(|index| pages.get(index as usize))
            .cloned()
            .ok_or_else(|| {
                FetchError::data_fetch(format!("page {} out of range (1..={})", page, total_pages))
            })?;
        Ok(MovieListEntity {
            page: Some(page),
            total_pages: Some(total_pages),
            total_results: Some(pages.iter().map(|p| p.len() as u32).sum()),
            results,
        })
    }

    pub fn upcoming_page(&self, page: u32) -> FetchResult<MovieListEntity> {
        Self::page_of(&self.upcoming, page)
    }

    pub fn popular_page(&self, page: u32) -> FetchResult<MovieListEntity> {
        Self::page_of(&self.popular, page)
    }

    pub fn movie_detail(&self, movie_id: i32) -> FetchResult<MovieDetailBundle> {
        let detail = self
            .details
            .iter()
            .find(|d| d.id == Some(movie_id))
            .cloned()
            .ok_or_else(|| FetchError::data_fetch(format!("movie {} not found", movie_id)))?;
        let results = self
            .recommendations
            .get(&movie_id.to_string())
            .cloned()
            .unwrap_or_default();
        Ok(MovieDetailBundle {
            detail,
            recommendations: MovieListEntity {
                page: Some(1),
                total_pages: Some(1),
                total_results: Some(results.len() as u32),
                results,
            },
        })
    }
}

/// Single-emission stream, delayed by `latency` to mimic a network hop.
fn deferred<T: Send + 'static>(
    latency: Duration,
    result: FetchResult<T>,
) -> BoxStream<'static, FetchResult<T>> {
    stream::once(async move {
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        result
    })
    .boxed()
}

/// Factory for the catalog's use cases.
#[derive(Debug, Clone)]
pub struct CatalogUseCases {
    catalog: Arc<Catalog>,
    latency: Duration,
}

impl CatalogUseCases {
    pub fn new(catalog: Catalog, latency: Duration) -> Self {
        Self {
            catalog: Arc::new(catalog),
            latency,
        }
    }

    pub fn upcoming(&self) -> FetchUpComingMovieList {
        FetchUpComingMovieList {
            catalog: Arc::clone(&self.catalog),
            latency: self.latency,
        }
    }

    pub fn popular(&self) -> FetchPopularMovieList {
        FetchPopularMovieList {
            catalog: Arc::clone(&self.catalog),
            latency: self.latency,
        }
    }

    pub fn movie_detail(&self) -> FetchMovieDetail {
        FetchMovieDetail {
            catalog: Arc::clone(&self.catalog),
            latency: self.latency,
        }
    }
}

pub struct FetchUpComingMovieList {
    catalog: Arc<Catalog>,
    latency: Duration,
}

impl UseCase for FetchUpComingMovieList {
    type Params = PageParams;
    type Output = MovieListEntity;

    fn invoke(&self, params: PageParams) -> BoxStream<'static, FetchResult<MovieListEntity>> {
        deferred(self.latency, self.catalog.upcoming_page(params.page))
    }
}

pub struct FetchPopularMovieList {
    catalog: Arc<Catalog>,
    latency: Duration,
}

impl UseCase for FetchPopularMovieList {
    type Params = PageParams;
    type Output = MovieListEntity;

    fn invoke(&self, params: PageParams) -> BoxStream<'static, FetchResult<MovieListEntity>> {
        deferred(self.latency, self.catalog.popular_page(params.page))
    }
}

pub struct FetchMovieDetail {
    catalog: Arc<Catalog>,
    latency: Duration,
}

impl UseCase for FetchMovieDetail {
    type Params = MovieDetailParams;
    type Output = MovieDetailBundle;

    fn invoke(
        &self,
        params: MovieDetailParams,
    ) -> BoxStream<'static, FetchResult<MovieDetailBundle>> {
        deferred(self.latency, self.catalog.movie_detail(params.movie_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "upcoming": [[{"id": 1, "title": "Alpha"}], [{"id": 2, "title": "Beta"}]],
        "popular": [[{"id": 3}]],
        "details": [{"id": 1, "title": "Alpha", "genres": [{"id": 18, "name": "Drama"}]}],
        "recommendations": {"1": [{"id": 2}]}
    }"#;

    #[test]
    fn pages_are_one_based() {
        let catalog = Catalog::from_json(FIXTURE).unwrap();
        let page = catalog.upcoming_page(2).unwrap();
        assert_eq!(page.page, Some(2));
        assert_eq!(page.total_pages, Some(2));
        assert_eq!(page.results[0].id, Some(2));
    }

    #[test]
    fn out_of_range_page_is_fetch_failure() {
        let catalog = Catalog::from_json(FIXTURE).unwrap();
        assert!(catalog.popular_page(2).is_err());
        assert!(catalog.popular_page(0).is_err());
    }

    #[test]
    fn unknown_movie_is_fetch_failure() {
        let catalog = Catalog::from_json(FIXTURE).unwrap();
        let err = catalog.movie_detail(99).unwrap_err();
        assert_eq!(err.reason(), "movie 99 not found");
    }

    #[tokio::test]
    async fn detail_use_case_bundles_recommendations() {
        let use_cases = CatalogUseCases::new(Catalog::from_json(FIXTURE).unwrap(), Duration::ZERO);
        let results: Vec<_> = use_cases
            .movie_detail()
            .invoke(MovieDetailParams { movie_id: 1 })
            .collect()
            .await;
        assert_eq!(results.len(), 1);
        let bundle = results[0].as_ref().unwrap();
        assert_eq!(bundle.detail.title.as_deref(), Some("Alpha"));
        assert_eq!(bundle.recommendations.results.len(), 1);
    }

    #[test]
    fn invalid_json_is_parse_error() {
        assert!(matches!(
            Catalog::from_json("{ nope"),
            Err(CatalogError::ParseError(_))
        ));
    }
}
