use chrono::{DateTime, NaiveDate, Utc};
use domain::Clearable;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Genre;

/// Movie stored in the local catalogue
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    /// TMDB ID the movie was imported from
    pub tmdb_id: i64,
    pub title: String,
    pub original_title: String,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    /// Release date (YYYY-MM-DD)
    pub release_date: Option<NaiveDate>,
    /// Runtime in minutes
    pub runtime: Option<i64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    /// ISO 639-1 code of the original language
    pub original_language: Option<String>,
    pub vote_average: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Attached genres, ordered by ID
    pub genres: Vec<Genre>,
}

/// Data required to insert a movie
#[derive(Debug, Clone)]
pub struct CreateMovie {
    pub tmdb_id: i64,
    pub title: String,
    pub original_title: String,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub runtime: Option<i64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub original_language: Option<String>,
    pub vote_average: f64,
}

impl From<&tmdb::MovieDetails> for CreateMovie {
    fn from(details: &tmdb::MovieDetails) -> Self {
        Self {
            tmdb_id: details.id,
            title: details.title.trim().to_string(),
            original_title: details.original_title.trim().to_string(),
            overview: non_empty(Some(details.overview.as_str())),
            tagline: non_empty(details.tagline.as_deref()),
            release_date: details
                .release_date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
            runtime: details.runtime.filter(|r| *r > 0),
            poster_path: non_empty(details.poster_path.as_deref()),
            backdrop_path: non_empty(details.backdrop_path.as_deref()),
            original_language: non_empty(Some(details.original_language.as_str())),
            vote_average: details.vote_average,
        }
    }
}

/// TMDB uses empty strings for missing text.
fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Request body for updating a movie.
/// Nullable fields use `Clearable` to distinguish between:
/// - Not provided (unchanged)
/// - Explicitly set to null (clear)
/// - Set to a new value
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovie {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub overview: Clearable<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub tagline: Clearable<String>,
    #[serde(default)]
    #[schema(value_type = Option<NaiveDate>)]
    pub release_date: Clearable<NaiveDate>,
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub runtime: Clearable<i64>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub poster_path: Clearable<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub backdrop_path: Clearable<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub original_language: Clearable<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> tmdb::MovieDetails {
        serde_json::from_value(serde_json::json!({
            "id": 603,
            "title": "The Matrix",
            "original_title": "The Matrix",
            "overview": "",
            "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
            "backdrop_path": null,
            "release_date": "1999-03-30",
            "vote_average": 8.2,
            "original_language": "en",
            "runtime": 136,
            "tagline": "Welcome to the Real World.",
            "genres": [{"id": 28, "name": "Action"}]
        }))
        .unwrap()
    }

    #[test]
    fn test_create_movie_from_tmdb_details() {
        let movie = CreateMovie::from(&details());
        assert_eq!(movie.tmdb_id, 603);
        assert_eq!(movie.title, "The Matrix");
        assert_eq!(movie.overview, None);
        assert_eq!(movie.release_date, NaiveDate::from_ymd_opt(1999, 3, 30));
        assert_eq!(movie.runtime, Some(136));
        assert_eq!(movie.original_language.as_deref(), Some("en"));
    }

    #[test]
    fn test_unparseable_release_date_is_dropped() {
        let mut details = details();
        details.release_date = Some(String::new());
        assert_eq!(CreateMovie::from(&details).release_date, None);
    }

    #[test]
    fn test_update_movie_distinguishes_null_from_absent() {
        let body = r#"{"title": "Matrix", "tagline": null, "runtime": 140}"#;
        let update: UpdateMovie = serde_json::from_str(body).unwrap();
        assert_eq!(update.title.as_deref(), Some("Matrix"));
        assert_eq!(update.tagline, Clearable::Clear);
        assert_eq!(update.runtime, Clearable::Set(140));
        assert_eq!(update.overview, Clearable::Unchanged);
    }
}
