use domain::{CreateGenreRequest, GenreError};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::models::Genre;
use crate::repositories::GenreRepository;

#[derive(Debug, Error)]
pub enum GenreServiceError {
    #[error("Genre {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Invalid(#[from] GenreError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct GenreService {
    db: SqlitePool,
}

impl GenreService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<Genre>, GenreServiceError> {
        Ok(GenreRepository::get_all(&self.db).await?)
    }

    pub async fn find_one(&self, id: i64) -> Result<Genre, GenreServiceError> {
        GenreRepository::get_by_id(&self.db, id)
            .await?
            .ok_or(GenreServiceError::NotFound(id))
    }

    /// Create a genre; names are unique ignoring case
    pub async fn create(&self, name: &str) -> Result<Genre, GenreServiceError> {
        let request = CreateGenreRequest::new(name)?;
        let genre = GenreRepository::create(&self.db, &request.name).await?;
        tracing::info!("Created genre {} '{}'", genre.id, genre.name);
        Ok(genre)
    }

    /// Delete a genre, unlinking it from every movie
    pub async fn delete(&self, id: i64) -> Result<Genre, GenreServiceError> {
        let genre = self.find_one(id).await?;

        if !GenreRepository::delete(&self.db, id).await? {
            return Err(GenreServiceError::NotFound(id));
        }

        tracing::info!("Deleted genre {} '{}'", genre.id, genre.name);
        Ok(genre)
    }
}

#[cfg(test)]
mod tests {
    use domain::GenreIds;

    use super::*;
    use crate::db::memory_pool;
    use crate::repositories::MovieRepository;

    #[tokio::test]
    async fn test_create_trims_and_rejects_blank() {
        let service = GenreService::new(memory_pool().await);
        let genre = service.create("  Western ").await.unwrap();
        assert_eq!(genre.name, "Western");

        let err = service.create(" ").await.unwrap_err();
        assert!(matches!(err, GenreServiceError::Invalid(GenreError::EmptyName)));
    }

    #[tokio::test]
    async fn test_delete_missing_genre() {
        let service = GenreService::new(memory_pool().await);
        let err = service.delete(5).await.unwrap_err();
        assert!(matches!(err, GenreServiceError::NotFound(5)));
    }

    #[tokio::test]
    async fn test_delete_unlinks_movies() {
        let pool = memory_pool().await;
        let service = GenreService::new(pool.clone());
        let western = service.create("Western").await.unwrap();
        let drama = service.create("Drama").await.unwrap();

        let movie_id: i64 = sqlx::query_scalar(
            "INSERT INTO movie (tmdb_id, title, original_title) \
             VALUES (335, 'Once Upon a Time in the West', 'C''era una volta il West') \
             RETURNING id",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        let ids = GenreIds::new([western.id, drama.id]).unwrap();
        MovieRepository::attach_genres(&pool, movie_id, &ids)
            .await
            .unwrap();

        let deleted = service.delete(western.id).await.unwrap();
        assert_eq!(deleted, western);

        let movie = MovieRepository::get_by_id(&pool, movie_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(movie.genres, vec![drama]);
    }
}
