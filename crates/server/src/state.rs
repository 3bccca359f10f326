use sqlx::SqlitePool;
use std::sync::Arc;
use tmdb::{TmdbClient, TmdbError};

use crate::auth::JwtKeys;
use crate::config::Config;
use crate::services::{
    CinemaService, GenreService, MovieMetadataProvider, MovieService, ScreeningService,
    TmdbProvider,
};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<JwtKeys>,
    pub movies: Arc<MovieService>,
    pub screenings: Arc<ScreeningService>,
    pub genres: Arc<GenreService>,
    pub cinemas: Arc<CinemaService>,
}

impl AppState {
    /// Build the state with a TMDB client configured from `config`
    pub fn new(db: SqlitePool, config: Config) -> Result<Self, TmdbError> {
        let tmdb = TmdbClient::with_timeout(&config.tmdb_api_key, config.tmdb_timeout())?
            .with_language(&config.tmdb_language)
            .with_base_url(&config.tmdb_base_url);
        let metadata = Arc::new(TmdbProvider::new(Arc::new(tmdb)));

        Ok(Self::with_metadata_provider(db, config, metadata))
    }

    /// Build the state around any metadata provider
    pub fn with_metadata_provider(
        db: SqlitePool,
        config: Config,
        metadata: Arc<dyn MovieMetadataProvider>,
    ) -> Self {
        let auth = Arc::new(JwtKeys::new(config.jwt_secret.as_bytes()));

        Self {
            movies: Arc::new(MovieService::new(db.clone(), metadata)),
            screenings: Arc::new(ScreeningService::new(db.clone())),
            genres: Arc::new(GenreService::new(db.clone())),
            cinemas: Arc::new(CinemaService::new(db)),
            auth,
        }
    }
}
