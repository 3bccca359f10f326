use axum::{extract::State, http::StatusCode, Json};

use crate::api::extract::{AppJson, AppPath};
use crate::error::{AppResult, ErrorBody};
use crate::models::{CreateGenre, Genre};
use crate::state::AppState;

/// List genres ordered by name
#[utoipa::path(
    get,
    path = "/genre",
    tag = "genre",
    responses(
        (status = 200, description = "All genres", body = Vec<Genre>)
    )
)]
pub async fn find_all(State(state): State<AppState>) -> AppResult<Json<Vec<Genre>>> {
    Ok(Json(state.genres.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/genre/{id}",
    tag = "genre",
    params(("id" = i64, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre", body = Genre),
        (status = 404, description = "Genre not found", body = ErrorBody)
    )
)]
pub async fn find_one(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Genre>> {
    Ok(Json(state.genres.find_one(id).await?))
}

#[utoipa::path(
    post,
    path = "/genre",
    tag = "genre",
    request_body = CreateGenre,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 400, description = "Blank name", body = ErrorBody),
        (status = 409, description = "Genre name already taken", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateGenre>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    let genre = state.genres.create(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(genre)))
}

/// Delete a genre, unlinking it from every movie
#[utoipa::path(
    delete,
    path = "/genre/{id}",
    tag = "genre",
    params(("id" = i64, Path, description = "Genre ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Deleted genre", body = Genre),
        (status = 404, description = "Genre not found", body = ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Genre>> {
    Ok(Json(state.genres.delete(id).await?))
}
