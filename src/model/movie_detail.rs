use crate::domain::{GenreEntity, MovieDetailEntity};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Genre {
    pub id: Option<i32>,
    pub name: Option<String>,
}

impl Genre {
    pub fn from_entity(entity: &GenreEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
        }
    }
}

/// Everything the detail screen shows about one movie.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieDetail {
    pub adult: Option<bool>,
    pub backdrop_path: Option<String>,
    pub budget: Option<i64>,
    pub genres: Option<Vec<Genre>>,
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

impl MovieDetail {
    pub fn from_entity(entity: &MovieDetailEntity) -> Self {
        Self {
            adult: entity.adult,
            backdrop_path: entity.backdrop_path.clone(),
            budget: entity.budget,
            genres: entity
                .genres
                .as_ref()
                .map(|genres| genres.iter().map(Genre::from_entity).collect()),
            homepage: entity.homepage.clone(),
            id: entity.id,
            imdb_id: entity.imdb_id.clone(),
            original_language: entity.original_language.clone(),
            original_title: entity.original_title.clone(),
            overview: entity.overview.clone(),
            popularity: entity.popularity,
            poster_path: entity.poster_path.clone(),
            release_date: entity.release_date.clone(),
            revenue: entity.revenue,
            runtime: entity.runtime,
            status: entity.status.clone(),
            tagline: entity.tagline.clone(),
            title: entity.title.clone(),
            video: entity.video,
            vote_average: entity.vote_average,
            vote_count: entity.vote_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_entity_maps_to_empty_detail() {
        assert_eq!(
            MovieDetail::from_entity(&MovieDetailEntity::default()),
            MovieDetail::default()
        );
    }

    #[test]
    fn genres_are_mapped() {
        let entity = MovieDetailEntity {
            id: Some(7),
            genres: Some(vec![GenreEntity {
                id: Some(18),
                name: Some("Drama".to_string()),
            }]),
            ..Default::default()
        };
        let detail = MovieDetail::from_entity(&entity);
        assert_eq!(
            detail.genres,
            Some(vec![Genre {
                id: Some(18),
                name: Some("Drama".to_string()),
            }])
        );
    }
}
