use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::error::ErrorKind;
use thiserror::Error;
use tmdb::TmdbError;
use utoipa::ToSchema;

use crate::auth::AuthError;
use crate::services::{
    CinemaServiceError, GenreServiceError, MovieServiceError, ScreeningServiceError,
};

pub type AppResult<T> = Result<T, AppError>;

/// Error returned by every HTTP handler
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    UpstreamTimeout(String),
    #[error("Database error: {0}")]
    Database(sqlx::Error),
    #[error("{0}")]
    Internal(String),
}

/// JSON body of an error response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    /// Reason phrase of the status code
    pub error: String,
    pub message: String,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            tracing::error!("{}", self);
            match self {
                // Driver details stay in the log
                AppError::Database(_) => "Internal server error".to_string(),
                other => other.to_string(),
            }
        } else {
            tracing::debug!("Request failed with {}: {}", status, self);
            self.to_string()
        };

        let body = ErrorBody {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err.as_database_error().map(|e| e.kind()) {
            Some(ErrorKind::UniqueViolation) => {
                AppError::Conflict("A record with the same unique value already exists".into())
            }
            Some(ErrorKind::ForeignKeyViolation) => {
                AppError::Conflict("The record is still referenced by other records".into())
            }
            Some(ErrorKind::CheckViolation) => {
                AppError::Validation("The values violate a database constraint".into())
            }
            _ => AppError::Database(err),
        }
    }
}

impl From<TmdbError> for AppError {
    fn from(err: TmdbError) -> Self {
        if err.is_timeout() {
            AppError::UpstreamTimeout(format!("TMDB request timed out: {}", err))
        } else {
            AppError::Upstream(format!("TMDB request failed: {}", err))
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InsufficientRole { .. } => AppError::Forbidden(err.to_string()),
            _ => AppError::Unauthorized(err.to_string()),
        }
    }
}

impl From<domain::PaginationError> for AppError {
    fn from(err: domain::PaginationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<MovieServiceError> for AppError {
    fn from(err: MovieServiceError) -> Self {
        match err {
            MovieServiceError::NotFound(_) | MovieServiceError::GenresNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            MovieServiceError::AlreadyImported(_) => AppError::Conflict(err.to_string()),
            MovieServiceError::Field(_) | MovieServiceError::Genre(_) => {
                AppError::Validation(err.to_string())
            }
            MovieServiceError::Metadata { source, .. } => source.into(),
            MovieServiceError::Database(e) => e.into(),
        }
    }
}

impl From<ScreeningServiceError> for AppError {
    fn from(err: ScreeningServiceError) -> Self {
        match err {
            ScreeningServiceError::NotFound(_)
            | ScreeningServiceError::MovieNotFound(_)
            | ScreeningServiceError::CinemaNotFound(_) => AppError::NotFound(err.to_string()),
            ScreeningServiceError::Invalid(_) => AppError::Validation(err.to_string()),
            ScreeningServiceError::Database(e) => e.into(),
        }
    }
}

impl From<GenreServiceError> for AppError {
    fn from(err: GenreServiceError) -> Self {
        match err {
            GenreServiceError::NotFound(_) => AppError::NotFound(err.to_string()),
            GenreServiceError::Invalid(_) => AppError::Validation(err.to_string()),
            GenreServiceError::Database(e) => e.into(),
        }
    }
}

impl From<CinemaServiceError> for AppError {
    fn from(err: CinemaServiceError) -> Self {
        match err {
            CinemaServiceError::NotFound(_) => AppError::NotFound(err.to_string()),
            CinemaServiceError::Invalid(_) => AppError::Validation(err.to_string()),
            CinemaServiceError::Database(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
