use domain::{
    paginate, validate_available_seats, CreateScreeningRequest, PageRequest, Paginated,
    ScreeningError, ScreeningWindow,
};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::models::{CreateScreening, Screening, ScreeningFilter, UpdateScreening};
use crate::repositories::{
    CinemaRepository, MovieRepository, NewScreening, ScreeningChanges, ScreeningRepository,
};

#[derive(Debug, Error)]
pub enum ScreeningServiceError {
    #[error("Screening {0} not found")]
    NotFound(i64),
    #[error("Movie {0} not found")]
    MovieNotFound(i64),
    #[error("Cinema {0} not found")]
    CinemaNotFound(i64),
    #[error(transparent)]
    Invalid(#[from] ScreeningError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Service for screenings of catalogue movies in cinemas
pub struct ScreeningService {
    db: SqlitePool,
}

impl ScreeningService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create(&self, data: CreateScreening) -> Result<Screening, ScreeningServiceError> {
        let request = CreateScreeningRequest::new(
            data.start,
            data.end,
            data.active,
            data.initial_available_seats,
            data.cinema_id,
            data.movie_id,
        )?;

        if MovieRepository::get_by_id(&self.db, request.movie_id)
            .await?
            .is_none()
        {
            return Err(ScreeningServiceError::MovieNotFound(request.movie_id));
        }
        if CinemaRepository::get_by_id(&self.db, request.cinema_id)
            .await?
            .is_none()
        {
            return Err(ScreeningServiceError::CinemaNotFound(request.cinema_id));
        }

        let screening = ScreeningRepository::create(
            &self.db,
            NewScreening {
                start: request.window.start(),
                end: request.window.end(),
                active: request.active,
                available_seats: request.initial_available_seats,
                movie_id: request.movie_id,
                cinema_id: request.cinema_id,
            },
        )
        .await?;

        tracing::info!(
            "Created screening {} of movie {} in cinema {}",
            screening.id,
            screening.movie_id,
            screening.cinema_id
        );
        Ok(screening)
    }

    /// List screenings ordered by start time, optionally filtered
    pub async fn find_all(
        &self,
        page: PageRequest,
        filter: ScreeningFilter,
    ) -> Result<Paginated<Screening>, ScreeningServiceError> {
        let result = paginate(
            page,
            ScreeningRepository::count(&self.db, &filter),
            |skip, take| ScreeningRepository::list(&self.db, &filter, skip, take),
        )
        .await?;
        Ok(result)
    }

    pub async fn find_one(&self, id: i64) -> Result<Screening, ScreeningServiceError> {
        ScreeningRepository::get_by_id(&self.db, id)
            .await?
            .ok_or(ScreeningServiceError::NotFound(id))
    }

    /// Partially update a screening.
    /// The window that results from merging the change must still be valid.
    pub async fn update(
        &self,
        id: i64,
        data: UpdateScreening,
    ) -> Result<Screening, ScreeningServiceError> {
        let current = self.find_one(id).await?;

        let window = ScreeningWindow::new(current.start, current.end)?
            .with_bounds(data.start, data.end)?;
        let available_seats = data
            .available_seats
            .map(validate_available_seats)
            .transpose()?;

        let changes = ScreeningChanges {
            start: Some(window.start()),
            end: Some(window.end()),
            active: data.active,
            available_seats,
        };

        ScreeningRepository::update(&self.db, id, changes)
            .await?
            .ok_or(ScreeningServiceError::NotFound(id))
    }

    /// Delete a screening, returning it as it was before deletion
    pub async fn delete(&self, id: i64) -> Result<Screening, ScreeningServiceError> {
        let screening = self.find_one(id).await?;

        if !ScreeningRepository::delete(&self.db, id).await? {
            return Err(ScreeningServiceError::NotFound(id));
        }

        tracing::info!("Deleted screening {}", id);
        Ok(screening)
    }
}
