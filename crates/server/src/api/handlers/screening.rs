use axum::{extract::State, http::StatusCode, Extension, Json};
use domain::Paginated;

use crate::api::extract::{AppJson, AppPath, AppQuery};
use crate::auth::Claims;
use crate::error::{AppResult, ErrorBody};
use crate::models::{CreateScreening, PaginationQuery, Screening, ScreeningFilter, UpdateScreening};
use crate::state::AppState;

/// List screenings ordered by start time
#[utoipa::path(
    get,
    path = "/screening",
    tag = "screening",
    params(PaginationQuery, ScreeningFilter),
    responses(
        (status = 200, description = "Page of screenings", body = Paginated<Screening>),
        (status = 400, description = "Invalid pagination", body = ErrorBody)
    )
)]
pub async fn find_all(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PaginationQuery>,
    AppQuery(filter): AppQuery<ScreeningFilter>,
) -> AppResult<Json<Paginated<Screening>>> {
    let screenings = state
        .screenings
        .find_all(page.into_request()?, filter)
        .await?;
    Ok(Json(screenings))
}

#[utoipa::path(
    get,
    path = "/screening/{id}",
    tag = "screening",
    params(("id" = i64, Path, description = "Screening ID")),
    responses(
        (status = 200, description = "Screening", body = Screening),
        (status = 404, description = "Screening not found", body = ErrorBody)
    )
)]
pub async fn find_one(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Screening>> {
    Ok(Json(state.screenings.find_one(id).await?))
}

/// Schedule a screening of a movie in a cinema
#[utoipa::path(
    post,
    path = "/screening",
    tag = "screening",
    request_body = CreateScreening,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Screening created", body = Screening),
        (status = 400, description = "Invalid window or seat count", body = ErrorBody),
        (status = 404, description = "Movie or cinema not found", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<CreateScreening>,
) -> AppResult<(StatusCode, Json<Screening>)> {
    tracing::debug!(
        "{} is scheduling movie {} in cinema {}",
        claims.sub,
        payload.movie_id,
        payload.cinema_id
    );
    let screening = state.screenings.create(payload).await?;
    Ok((StatusCode::CREATED, Json(screening)))
}

#[utoipa::path(
    patch,
    path = "/screening/{id}",
    tag = "screening",
    params(("id" = i64, Path, description = "Screening ID")),
    request_body = UpdateScreening,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated screening", body = Screening),
        (status = 400, description = "Invalid window or seat count", body = ErrorBody),
        (status = 404, description = "Screening not found", body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateScreening>,
) -> AppResult<Json<Screening>> {
    Ok(Json(state.screenings.update(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/screening/{id}",
    tag = "screening",
    params(("id" = i64, Path, description = "Screening ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Deleted screening", body = Screening),
        (status = 404, description = "Screening not found", body = ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Screening>> {
    Ok(Json(state.screenings.delete(id).await?))
}
