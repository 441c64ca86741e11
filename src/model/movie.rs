use crate::domain::MovieEntity;

/// Movie card as rendered in lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Movie {
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

impl Movie {
    pub fn from_entity(entity: &MovieEntity) -> Self {
        Self {
            adult: entity.adult,
            backdrop_path: entity.backdrop_path.clone(),
            genre_ids: entity.genre_ids.clone(),
            id: entity.id,
            original_language: entity.original_language.clone(),
            original_title: entity.original_title.clone(),
            overview: entity.overview.clone(),
            popularity: entity.popularity,
            poster_path: entity.poster_path.clone(),
            release_date: entity.release_date.clone(),
            title: entity.title.clone(),
            vote_average: entity.vote_average,
            vote_count: entity.vote_count,
        }
    }

    /// Case-insensitive match against title and original title.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        [self.title.as_deref(), self.original_title.as_deref()]
            .into_iter()
            .flatten()
            .any(|title| title.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_entity_maps_to_empty_movie() {
        assert_eq!(Movie::from_entity(&MovieEntity::default()), Movie::default());
    }

    #[test]
    fn fields_copy_across() {
        let entity = MovieEntity {
            id: Some(42),
            title: Some("Dune".to_string()),
            vote_average: Some(8.1),
            genre_ids: Some(vec![878]),
            ..Default::default()
        };
        let movie = Movie::from_entity(&entity);
        assert_eq!(movie.id, Some(42));
        assert_eq!(movie.title.as_deref(), Some("Dune"));
        assert_eq!(movie.vote_average, Some(8.1));
        assert_eq!(movie.genre_ids, Some(vec![878]));
    }

    #[test]
    fn keyword_matching_ignores_case_and_blank() {
        let movie = Movie {
            title: Some("Blade Runner".to_string()),
            original_title: Some("Blade Runner 2049".to_string()),
            ..Default::default()
        };
        assert!(movie.matches_keyword("runner"));
        assert!(movie.matches_keyword("2049"));
        assert!(!movie.matches_keyword("   "));
        assert!(!movie.matches_keyword("alien"));
    }
}
