use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[cfg_attr(feature = "openapi", schema(as = TmdbGenre))]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ProductionCompany {
    pub id: i64,
    pub name: String,
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SpokenLanguage {
    pub iso_639_1: String,
    #[serde(default)]
    pub english_name: String,
    #[serde(default)]
    pub name: String,
}

// ============ Movie Details ============

/// Response of `GET /movie/{movie_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    pub original_title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    /// Empty string when TMDB has no date.
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub video: bool,
    pub runtime: Option<i64>,
    pub status: Option<String>,
    pub tagline: Option<String>,
    pub budget: Option<i64>,
    pub revenue: Option<i64>,
    pub imdb_id: Option<String>,
    pub homepage: Option<String>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_details_deserialize() {
        let json = r#"{
            "adult": false,
            "backdrop_path": "/fNG7i7RqMErkcqhohV2a6cV1Ehy.jpg",
            "budget": 63000000,
            "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
            "homepage": "http://www.warnerbros.com/matrix",
            "id": 603,
            "imdb_id": "tt0133093",
            "original_language": "en",
            "original_title": "The Matrix",
            "overview": "Set in the 22nd century, The Matrix tells the story of a computer hacker.",
            "popularity": 79.3,
            "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
            "production_companies": [
                {"id": 79, "logo_path": "/at4uYdwAAgNRKhZuuFX8ShKSybw.png", "name": "Village Roadshow Pictures", "origin_country": "US"}
            ],
            "release_date": "1999-03-30",
            "revenue": 463517383,
            "runtime": 136,
            "spoken_languages": [{"english_name": "English", "iso_639_1": "en", "name": "English"}],
            "status": "Released",
            "tagline": "Welcome to the Real World.",
            "title": "The Matrix",
            "video": false,
            "vote_average": 8.2,
            "vote_count": 24000
        }"#;

        let movie: MovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 603);
        assert_eq!(movie.title, "The Matrix");
        assert_eq!(movie.runtime, Some(136));
        assert_eq!(movie.genres.len(), 2);
        assert_eq!(movie.genres[1].name, "Science Fiction");
        assert_eq!(movie.production_companies[0].origin_country, "US");
    }

    #[test]
    fn test_movie_details_tolerates_missing_optional_fields() {
        let json = r#"{"id": 1, "title": "Untitled", "original_title": "Untitled", "poster_path": null, "backdrop_path": null, "release_date": "", "runtime": null, "status": null, "tagline": null, "budget": null, "revenue": null, "imdb_id": null, "homepage": null}"#;
        let movie: MovieDetails = serde_json::from_str(json).unwrap();
        assert!(movie.genres.is_empty());
        assert_eq!(movie.overview, "");
        assert_eq!(movie.release_date.as_deref(), Some(""));
    }
}
