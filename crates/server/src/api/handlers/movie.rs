use axum::{extract::State, http::StatusCode, Extension, Json};
use domain::Paginated;

use crate::api::extract::{AppJson, AppPath, AppQuery};
use crate::auth::Claims;
use crate::error::{AppResult, ErrorBody};
use crate::models::{Movie, PaginationQuery, UpdateMovie};
use crate::state::AppState;

/// List movies
#[utoipa::path(
    get,
    path = "/movie",
    tag = "movie",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of movies ordered by ID", body = Paginated<Movie>),
        (status = 400, description = "Invalid pagination", body = ErrorBody)
    )
)]
pub async fn find_all(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaginationQuery>,
) -> AppResult<Json<Paginated<Movie>>> {
    let movies = state.movies.find_all(query.into_request()?).await?;
    Ok(Json(movies))
}

/// Get movie details from TMDB without importing
#[utoipa::path(
    get,
    path = "/movie/tmdb/{id}",
    tag = "movie",
    params(("id" = i64, Path, description = "TMDB movie ID")),
    responses(
        (status = 200, description = "TMDB movie details", body = tmdb::MovieDetails),
        (status = 502, description = "TMDB request failed", body = ErrorBody),
        (status = 504, description = "TMDB request timed out", body = ErrorBody)
    )
)]
pub async fn find_one_tmdb(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<tmdb::MovieDetails>> {
    let details = state.movies.find_one_tmdb(id).await?;
    Ok(Json(details))
}

/// Import a movie from TMDB
#[utoipa::path(
    post,
    path = "/movie/tmdb/{id}",
    tag = "movie",
    params(("id" = i64, Path, description = "TMDB movie ID")),
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Movie imported", body = Movie),
        (status = 409, description = "Movie already imported", body = ErrorBody),
        (status = 502, description = "TMDB request failed", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppPath(id): AppPath<i64>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    tracing::debug!("{} is importing TMDB movie {}", claims.sub, id);
    let movie = state.movies.create(id).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// Attach genres to a movie
#[utoipa::path(
    patch,
    path = "/movie/{id}/genre",
    tag = "movie",
    params(("id" = i64, Path, description = "Movie ID")),
    request_body(content = Vec<i64>, description = "Genre IDs"),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Movie with its updated genres", body = Movie),
        (status = 400, description = "Empty or invalid genre list", body = ErrorBody),
        (status = 404, description = "Movie or genre not found", body = ErrorBody)
    )
)]
pub async fn attach_genre(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(genre_ids): AppJson<Vec<i64>>,
) -> AppResult<Json<Movie>> {
    let movie = state.movies.attach_genre(id, genre_ids).await?;
    Ok(Json(movie))
}

/// Detach genres from a movie
#[utoipa::path(
    delete,
    path = "/movie/{id}/genre",
    tag = "movie",
    params(("id" = i64, Path, description = "Movie ID")),
    request_body(content = Vec<i64>, description = "Genre IDs"),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Movie with its updated genres", body = Movie),
        (status = 404, description = "Movie not found", body = ErrorBody)
    )
)]
pub async fn detach_genre(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(genre_ids): AppJson<Vec<i64>>,
) -> AppResult<Json<Movie>> {
    let movie = state.movies.detach_genre(id, genre_ids).await?;
    Ok(Json(movie))
}

/// Search movies by title
#[utoipa::path(
    get,
    path = "/movie/search/{query}",
    tag = "movie",
    params(
        ("query" = String, Path, description = "Case-insensitive title fragment"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Page of matching movies", body = Paginated<Movie>),
        (status = 400, description = "Blank query or invalid pagination", body = ErrorBody)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    AppPath(query): AppPath<String>,
    AppQuery(page): AppQuery<PaginationQuery>,
) -> AppResult<Json<Paginated<Movie>>> {
    let movies = state.movies.search(&query, page.into_request()?).await?;
    Ok(Json(movies))
}

/// Get a movie by ID
#[utoipa::path(
    get,
    path = "/movie/{id}",
    tag = "movie",
    params(("id" = i64, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie with its genres", body = Movie),
        (status = 404, description = "Movie not found", body = ErrorBody)
    )
)]
pub async fn find_one(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Movie>> {
    let movie = state.movies.find_one(id).await?;
    Ok(Json(movie))
}

/// Update a movie
#[utoipa::path(
    patch,
    path = "/movie/{id}",
    tag = "movie",
    params(("id" = i64, Path, description = "Movie ID")),
    request_body = UpdateMovie,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated movie", body = Movie),
        (status = 400, description = "Invalid field value", body = ErrorBody),
        (status = 404, description = "Movie not found", body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateMovie>,
) -> AppResult<Json<Movie>> {
    let movie = state.movies.update(id, payload).await?;
    Ok(Json(movie))
}

/// Delete a movie
#[utoipa::path(
    delete,
    path = "/movie/{id}",
    tag = "movie",
    params(("id" = i64, Path, description = "Movie ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Deleted movie", body = Movie),
        (status = 404, description = "Movie not found", body = ErrorBody),
        (status = 409, description = "Movie still has screenings", body = ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Movie>> {
    tracing::debug!("{} is deleting movie {}", claims.sub, id);
    let movie = state.movies.delete(id).await?;
    Ok(Json(movie))
}
