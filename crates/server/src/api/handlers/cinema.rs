use axum::{extract::State, http::StatusCode, Json};
use domain::Paginated;

use crate::api::extract::{AppJson, AppPath, AppQuery};
use crate::error::{AppResult, ErrorBody};
use crate::models::{Cinema, CreateCinema, PaginationQuery};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/cinema",
    tag = "cinema",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of cinemas ordered by ID", body = Paginated<Cinema>),
        (status = 400, description = "Invalid pagination", body = ErrorBody)
    )
)]
pub async fn find_all(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaginationQuery>,
) -> AppResult<Json<Paginated<Cinema>>> {
    let cinemas = state.cinemas.find_all(query.into_request()?).await?;
    Ok(Json(cinemas))
}

#[utoipa::path(
    get,
    path = "/cinema/{id}",
    tag = "cinema",
    params(("id" = i64, Path, description = "Cinema ID")),
    responses(
        (status = 200, description = "Cinema", body = Cinema),
        (status = 404, description = "Cinema not found", body = ErrorBody)
    )
)]
pub async fn find_one(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Cinema>> {
    Ok(Json(state.cinemas.find_one(id).await?))
}

#[utoipa::path(
    post,
    path = "/cinema",
    tag = "cinema",
    request_body = CreateCinema,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Cinema created", body = Cinema),
        (status = 400, description = "Blank name or city", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCinema>,
) -> AppResult<(StatusCode, Json<Cinema>)> {
    let cinema = state.cinemas.create(payload).await?;
    Ok((StatusCode::CREATED, Json(cinema)))
}

#[utoipa::path(
    delete,
    path = "/cinema/{id}",
    tag = "cinema",
    params(("id" = i64, Path, description = "Cinema ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Deleted cinema", body = Cinema),
        (status = 404, description = "Cinema not found", body = ErrorBody),
        (status = 409, description = "Cinema still has screenings", body = ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Cinema>> {
    Ok(Json(state.cinemas.delete(id).await?))
}
