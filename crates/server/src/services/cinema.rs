use domain::{paginate, CreateCinemaError, CreateCinemaRequest, PageRequest, Paginated};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::models::{Cinema, CreateCinema};
use crate::repositories::CinemaRepository;

#[derive(Debug, Error)]
pub enum CinemaServiceError {
    #[error("Cinema {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Invalid(#[from] CreateCinemaError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct CinemaService {
    db: SqlitePool,
}

impl CinemaService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn find_all(
        &self,
        page: PageRequest,
    ) -> Result<Paginated<Cinema>, CinemaServiceError> {
        let result = paginate(page, CinemaRepository::count(&self.db), |skip, take| {
            CinemaRepository::list(&self.db, skip, take)
        })
        .await?;
        Ok(result)
    }

    pub async fn find_one(&self, id: i64) -> Result<Cinema, CinemaServiceError> {
        CinemaRepository::get_by_id(&self.db, id)
            .await?
            .ok_or(CinemaServiceError::NotFound(id))
    }

    pub async fn create(&self, data: CreateCinema) -> Result<Cinema, CinemaServiceError> {
        let request = CreateCinemaRequest::new(&data.name, data.address.as_deref(), &data.city)?;
        let cinema = CinemaRepository::create(
            &self.db,
            &request.name,
            request.address.as_deref(),
            &request.city,
        )
        .await?;

        tracing::info!("Created cinema {} '{}'", cinema.id, cinema.name);
        Ok(cinema)
    }

    /// Delete a cinema. Fails while screenings still reference it.
    pub async fn delete(&self, id: i64) -> Result<Cinema, CinemaServiceError> {
        let cinema = self.find_one(id).await?;

        if !CinemaRepository::delete(&self.db, id).await? {
            return Err(CinemaServiceError::NotFound(id));
        }

        tracing::info!("Deleted cinema {} '{}'", cinema.id, cinema.name);
        Ok(cinema)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::db::memory_pool;
    use crate::error::AppError;
    use crate::repositories::{NewScreening, ScreeningRepository};

    #[tokio::test]
    async fn test_create_and_page_cinemas() {
        let service = CinemaService::new(memory_pool().await);
        for name in ["Electric", "Castro", "Rio"] {
            service
                .create(CreateCinema {
                    name: name.to_string(),
                    address: None,
                    city: "Somewhere".to_string(),
                })
                .await
                .unwrap();
        }

        let page = PageRequest::new(Some(2), Some(2)).unwrap();
        let result = service.find_all(page).await.unwrap();
        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data[0].name, "Rio");
        assert_eq!(result.meta.prev, Some(1));
        assert_eq!(result.meta.next, None);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_city() {
        let service = CinemaService::new(memory_pool().await);
        let err = service
            .create(CreateCinema {
                name: "Electric".to_string(),
                address: None,
                city: "".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CinemaServiceError::Invalid(CreateCinemaError::EmptyCity)));
    }

    #[tokio::test]
    async fn test_delete_with_screenings_conflicts() {
        let pool = memory_pool().await;
        let service = CinemaService::new(pool.clone());
        let cinema = service
            .create(CreateCinema {
                name: "Castro".to_string(),
                address: Some("429 Castro St".to_string()),
                city: "San Francisco".to_string(),
            })
            .await
            .unwrap();
        let movie_id: i64 = sqlx::query_scalar(
            "INSERT INTO movie (tmdb_id, title, original_title) \
             VALUES (949, 'Heat', 'Heat') RETURNING id",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        ScreeningRepository::create(
            &pool,
            NewScreening {
                start: Utc.with_ymd_and_hms(2024, 5, 1, 19, 0, 0).unwrap(),
                end: Utc.with_ymd_and_hms(2024, 5, 1, 22, 0, 0).unwrap(),
                active: true,
                available_seats: 120,
                movie_id,
                cinema_id: cinema.id,
            },
        )
        .await
        .unwrap();

        let err = service.delete(cinema.id).await.unwrap_err();
        assert!(matches!(err, CinemaServiceError::Database(_)));
        assert_eq!(AppError::from(err).status_code(), StatusCode::CONFLICT);
        assert!(service.find_one(cinema.id).await.is_ok());
    }
}
