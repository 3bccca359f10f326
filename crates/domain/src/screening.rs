//! Screening requests.
//!
//! A screening occupies a half-open time window `[start, end)` in one cinema
//! and tracks the seats still available for booking.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Error when a screening request is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreeningError {
    #[error("Screening must start before it ends (start {start}, end {end})")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("Initial available seats must be positive, got {0}")]
    InitialSeatsNotPositive(i64),
    #[error("Available seats must not be negative, got {0}")]
    NegativeSeats(i64),
    #[error("{field} must be a positive id, got {value}")]
    InvalidReference { field: &'static str, value: i64 },
}

/// A validated `start < end` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreeningWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ScreeningWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ScreeningError> {
        if start >= end {
            return Err(ScreeningError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Apply optional new bounds on top of the current window and re-validate.
    pub fn with_bounds(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, ScreeningError> {
        Self::new(start.unwrap_or(self.start), end.unwrap_or(self.end))
    }
}

/// Validate a seat count coming from an update.
pub fn validate_available_seats(seats: i64) -> Result<i64, ScreeningError> {
    if seats < 0 {
        return Err(ScreeningError::NegativeSeats(seats));
    }
    Ok(seats)
}

/// Request to create a screening.
#[derive(Debug, Clone)]
pub struct CreateScreeningRequest {
    pub window: ScreeningWindow,
    pub active: bool,
    pub initial_available_seats: i64,
    pub cinema_id: i64,
    pub movie_id: i64,
}

impl CreateScreeningRequest {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        active: bool,
        initial_available_seats: i64,
        cinema_id: i64,
        movie_id: i64,
    ) -> Result<Self, ScreeningError> {
        let window = ScreeningWindow::new(start, end)?;

        if initial_available_seats < 1 {
            return Err(ScreeningError::InitialSeatsNotPositive(
                initial_available_seats,
            ));
        }
        if cinema_id < 1 {
            return Err(ScreeningError::InvalidReference {
                field: "cinemaId",
                value: cinema_id,
            });
        }
        if movie_id < 1 {
            return Err(ScreeningError::InvalidReference {
                field: "movieId",
                value: movie_id,
            });
        }

        Ok(Self {
            window,
            active,
            initial_available_seats,
            cinema_id,
            movie_id,
        })
    }
}
