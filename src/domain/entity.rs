use serde::{Deserialize, Serialize};

/// One movie as listed by the data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieEntity {
    pub adult: Option<bool>,
    pub backdrop_path: Option<String>,
    pub genre_ids: Option<Vec<i32>>,
    pub id: Option<i32>,
    pub original_language: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub popularity: Option<f64>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub title: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i32>,
}

/// One page of a movie listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieListEntity {
    pub page: Option<u32>,
    pub results: Vec<MovieEntity>,
    pub total_pages: Option<u32>,
    pub total_results: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenreEntity {
    pub id: Option<i32>,
    pub name: Option<String>,
}

/// Full record of a single movie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieDetailEntity {
    pub adult: Option<bool>,
    pub backdrop_path: Option<String>,
    pub budget: Option<i64>,
    pub genres: Option<Vec<GenreEntity>>,
    pub homepage: Option<String>,
    pub id: Option<i32>,
    pub imdb_id: Option<String>,
    pub original_language: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub popularity: Option<f64>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub revenue: Option<i64>,
    pub runtime: Option<i32>,
    pub status: Option<String>,
    pub tagline: Option<String>,
    pub title: Option<String>,
    pub video: Option<bool>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i32>,
}

/// Detail use-case output: the movie plus a page of recommendations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieDetailBundle {
    pub detail: MovieDetailEntity,
    pub recommendations: MovieListEntity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_deserialize_as_none() {
        let movie: MovieEntity = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(movie.id, Some(3));
        assert!(movie.title.is_none());
        assert!(movie.genre_ids.is_none());
    }

    #[test]
    fn list_without_results_is_empty() {
        let list: MovieListEntity = serde_json::from_str(r#"{"page": 2}"#).unwrap();
        assert_eq!(list.page, Some(2));
        assert!(list.results.is_empty());
    }
}
