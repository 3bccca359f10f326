//! Movie metadata provider seam

use std::sync::Arc;

use async_trait::async_trait;
use tmdb::{MovieDetails, TmdbClient, TmdbError};

/// Source of canonical movie details, keyed by TMDB id
#[async_trait]
pub trait MovieMetadataProvider: Send + Sync {
    /// Fetch full details for a single movie
    async fn movie_details(&self, tmdb_id: i64) -> Result<MovieDetails, TmdbError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// TMDB-backed metadata provider
pub struct TmdbProvider {
    client: Arc<TmdbClient>,
}

impl TmdbProvider {
    pub fn new(client: Arc<TmdbClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MovieMetadataProvider for TmdbProvider {
    async fn movie_details(&self, tmdb_id: i64) -> Result<MovieDetails, TmdbError> {
        self.client.get_movie(tmdb_id).await
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
