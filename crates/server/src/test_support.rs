//! Shared fixtures for unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use domain::Role;
use tmdb::{MovieDetails, TmdbError};

use crate::auth::Claims;
use crate::config::Config;
use crate::db::memory_pool;
use crate::services::MovieMetadataProvider;
use crate::state::AppState;

/// In-memory metadata provider knowing a handful of movies
#[derive(Debug, Default)]
pub struct FakeMetadata;

#[async_trait]
impl MovieMetadataProvider for FakeMetadata {
    async fn movie_details(&self, tmdb_id: i64) -> Result<MovieDetails, TmdbError> {
        let (title, release_date, runtime) = match tmdb_id {
            603 => ("The Matrix", "1999-03-30", 136),
            604 => ("The Matrix Reloaded", "2003-05-15", 138),
            949 => ("Heat", "1995-12-15", 170),
            _ => {
                return Err(TmdbError::Api {
                    status_code: 404,
                    message: "The resource you requested could not be found.".to_string(),
                })
            }
        };

        let details = serde_json::from_value(serde_json::json!({
            "id": tmdb_id,
            "title": title,
            "original_title": title,
            "overview": format!("Overview of {}", title),
            "release_date": release_date,
            "runtime": runtime,
            "vote_average": 7.9,
            "original_language": "en",
            "genres": [{"id": 28, "name": "Action"}]
        }))
        .map_err(|source| TmdbError::Json {
            path: ".".to_string(),
            source,
        })?;
        Ok(details)
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

pub const JWT_SECRET: &str = "test-secret";

pub async fn test_state() -> AppState {
    let config = Config::new(
        "127.0.0.1:0".parse().unwrap(),
        "sqlite::memory:".to_string(),
        "test-api-key".to_string(),
        JWT_SECRET.to_string(),
    );
    AppState::with_metadata_provider(memory_pool().await, config, Arc::new(FakeMetadata))
}

pub fn bearer(state: &AppState, role: Role) -> String {
    let token = state
        .auth
        .issue(&Claims::new("tester", role, Duration::hours(1)))
        .unwrap();
    format!("Bearer {}", token)
}
