use std::sync::Arc;

use domain::{
    paginate, validate_title, validate_tmdb_id, GenreError, GenreIds, MovieFieldError,
    PageRequest, Paginated, SearchQuery,
};
use sqlx::SqlitePool;
use thiserror::Error;
use tmdb::{MovieDetails, TmdbError};

use super::MovieMetadataProvider;
use crate::models::{CreateMovie, Movie, UpdateMovie};
use crate::repositories::{GenreRepository, MovieRepository};

#[derive(Debug, Error)]
pub enum MovieServiceError {
    #[error("Movie {0} not found")]
    NotFound(i64),
    #[error("Movie with TMDB id {0} already exists")]
    AlreadyImported(i64),
    #[error("Genres not found: {0:?}")]
    GenresNotFound(Vec<i64>),
    #[error(transparent)]
    Field(#[from] MovieFieldError),
    #[error(transparent)]
    Genre(#[from] GenreError),
    #[error("{provider} request failed: {source}")]
    Metadata {
        provider: &'static str,
        #[source]
        source: TmdbError,
    },
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Service for the local movie catalogue
pub struct MovieService {
    db: SqlitePool,
    metadata: Arc<dyn MovieMetadataProvider>,
}

impl MovieService {
    pub fn new(db: SqlitePool, metadata: Arc<dyn MovieMetadataProvider>) -> Self {
        Self { db, metadata }
    }

    /// List movies ordered by ID
    pub async fn find_all(&self, page: PageRequest) -> Result<Paginated<Movie>, MovieServiceError> {
        let result = paginate(page, MovieRepository::count(&self.db), |skip, take| {
            MovieRepository::list(&self.db, skip, take)
        })
        .await?;
        Ok(result)
    }

    pub async fn find_one(&self, id: i64) -> Result<Movie, MovieServiceError> {
        MovieRepository::get_by_id(&self.db, id)
            .await?
            .ok_or(MovieServiceError::NotFound(id))
    }

    /// Fetch details straight from the metadata provider, without persisting
    pub async fn find_one_tmdb(&self, tmdb_id: i64) -> Result<MovieDetails, MovieServiceError> {
        let tmdb_id = validate_tmdb_id(tmdb_id)?;
        self.fetch_details(tmdb_id).await
    }

    /// Import a movie from the metadata provider.
    /// The new movie has no genres.
    pub async fn create(&self, tmdb_id: i64) -> Result<Movie, MovieServiceError> {
        let tmdb_id = validate_tmdb_id(tmdb_id)?;

        if MovieRepository::get_by_tmdb_id(&self.db, tmdb_id)
            .await?
            .is_some()
        {
            return Err(MovieServiceError::AlreadyImported(tmdb_id));
        }

        let details = self.fetch_details(tmdb_id).await?;
        let data = CreateMovie::from(&details);
        let movie = MovieRepository::create(&self.db, data).await?;

        tracing::info!(
            "Imported movie {} '{}' from {} (tmdb_id={})",
            movie.id,
            movie.title,
            self.metadata.name(),
            tmdb_id
        );
        Ok(movie)
    }

    /// Link genres to a movie. Already linked genres are left alone.
    pub async fn attach_genre(
        &self,
        movie_id: i64,
        genre_ids: Vec<i64>,
    ) -> Result<Movie, MovieServiceError> {
        let ids = GenreIds::new(genre_ids)?;
        self.find_one(movie_id).await?;

        let missing = GenreRepository::find_missing(&self.db, &ids.as_vec()).await?;
        if !missing.is_empty() {
            return Err(MovieServiceError::GenresNotFound(missing));
        }

        let created = MovieRepository::attach_genres(&self.db, movie_id, &ids).await?;
        tracing::debug!("Attached {} genre link(s) to movie {}", created, movie_id);

        self.find_one(movie_id).await
    }

    /// Unlink genres from a movie. Genres that are not linked are ignored.
    pub async fn detach_genre(
        &self,
        movie_id: i64,
        genre_ids: Vec<i64>,
    ) -> Result<Movie, MovieServiceError> {
        let ids = GenreIds::new(genre_ids)?;
        self.find_one(movie_id).await?;

        let removed = MovieRepository::detach_genres(&self.db, movie_id, &ids).await?;
        tracing::debug!("Removed {} genre link(s) from movie {}", removed, movie_id);

        self.find_one(movie_id).await
    }

    pub async fn update(
        &self,
        id: i64,
        mut data: UpdateMovie,
    ) -> Result<Movie, MovieServiceError> {
        if let Some(title) = data.title.take() {
            data.title = Some(validate_title(&title)?);
        }
        if let Some(original_title) = data.original_title.take() {
            data.original_title = Some(validate_title(&original_title)?);
        }
        if let domain::Clearable::Set(runtime) = data.runtime {
            if runtime < 0 {
                return Err(MovieFieldError::NegativeRuntime(runtime).into());
            }
        }

        MovieRepository::update(&self.db, id, data)
            .await?
            .ok_or(MovieServiceError::NotFound(id))
    }

    /// Delete a movie, returning it as it was before deletion
    pub async fn delete(&self, id: i64) -> Result<Movie, MovieServiceError> {
        let movie = self.find_one(id).await?;

        if !MovieRepository::delete(&self.db, id).await? {
            return Err(MovieServiceError::NotFound(id));
        }

        tracing::info!("Deleted movie {} '{}'", movie.id, movie.title);
        Ok(movie)
    }

    /// Case-insensitive title search, ordered by ID
    pub async fn search(
        &self,
        query: &str,
        page: PageRequest,
    ) -> Result<Paginated<Movie>, MovieServiceError> {
        let query = SearchQuery::new(query)?;
        let pattern = query.like_pattern();
        tracing::debug!("Searching movies for '{}'", query.as_str());

        let result = paginate(
            page,
            MovieRepository::count_search(&self.db, &pattern),
            |skip, take| MovieRepository::search(&self.db, &pattern, skip, take),
        )
        .await?;
        Ok(result)
    }

    async fn fetch_details(&self, tmdb_id: i64) -> Result<MovieDetails, MovieServiceError> {
        self.metadata.movie_details(tmdb_id).await.map_err(|source| {
            tracing::warn!(
                "Failed to fetch movie {} from {}: {}",
                tmdb_id,
                self.metadata.name(),
                source
            );
            MovieServiceError::Metadata {
                provider: self.metadata.name(),
                source,
            }
        })
    }
}
