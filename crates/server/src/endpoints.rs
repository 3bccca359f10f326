//! Endpoint table and the dispatcher that mounts it.
//!
//! Every HTTP route is declared once as an [`Endpoint`]: verb, path, the role
//! a caller needs (if any) and a one-line summary. [`routes`] pairs each
//! entry with its handler and [`mount`] registers them on a router, wrapping
//! role-gated entries with [`require_role`].

use std::sync::Arc;

use axum::{
    handler::Handler,
    middleware,
    routing::{on, MethodFilter, MethodRouter},
    Router,
};
use domain::Role;

use crate::api::handlers::{cinema, genre, movie, screening, system};
use crate::auth::{require_role, JwtKeys, RoleGuard};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Patch,
    Delete,
}

impl Verb {
    pub fn filter(self) -> MethodFilter {
        match self {
            Verb::Get => MethodFilter::GET,
            Verb::Post => MethodFilter::POST,
            Verb::Patch => MethodFilter::PATCH,
            Verb::Delete => MethodFilter::DELETE,
        }
    }

    pub fn is_mutating(self) -> bool {
        !matches!(self, Verb::Get)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    pub verb: Verb,
    pub path: &'static str,
    /// Role a caller must hold; `None` for public endpoints
    pub role: Option<Role>,
    pub summary: &'static str,
}

const fn public(verb: Verb, path: &'static str, summary: &'static str) -> Endpoint {
    Endpoint {
        verb,
        path,
        role: None,
        summary,
    }
}

const fn admin(verb: Verb, path: &'static str, summary: &'static str) -> Endpoint {
    Endpoint {
        verb,
        path,
        role: Some(Role::Admin),
        summary,
    }
}

pub const MOVIE_FIND_ALL: Endpoint = public(Verb::Get, "/movie", "List movies");
pub const MOVIE_FIND_ONE_TMDB: Endpoint =
    public(Verb::Get, "/movie/tmdb/{id}", "Get movie details from TMDB");
pub const MOVIE_CREATE: Endpoint =
    admin(Verb::Post, "/movie/tmdb/{id}", "Import a movie from TMDB");
pub const MOVIE_ATTACH_GENRE: Endpoint =
    admin(Verb::Patch, "/movie/{id}/genre", "Attach genres to a movie");
pub const MOVIE_DETACH_GENRE: Endpoint =
    admin(Verb::Delete, "/movie/{id}/genre", "Detach genres from a movie");
pub const MOVIE_SEARCH: Endpoint =
    public(Verb::Get, "/movie/search/{query}", "Search movies by title");
pub const MOVIE_FIND_ONE: Endpoint = public(Verb::Get, "/movie/{id}", "Get a movie");
pub const MOVIE_UPDATE: Endpoint = admin(Verb::Patch, "/movie/{id}", "Update a movie");
pub const MOVIE_DELETE: Endpoint = admin(Verb::Delete, "/movie/{id}", "Delete a movie");

pub const SCREENING_FIND_ALL: Endpoint = public(Verb::Get, "/screening", "List screenings");
pub const SCREENING_FIND_ONE: Endpoint = public(Verb::Get, "/screening/{id}", "Get a screening");
pub const SCREENING_CREATE: Endpoint = admin(Verb::Post, "/screening", "Schedule a screening");
pub const SCREENING_UPDATE: Endpoint =
    admin(Verb::Patch, "/screening/{id}", "Update a screening");
pub const SCREENING_DELETE: Endpoint =
    admin(Verb::Delete, "/screening/{id}", "Delete a screening");

pub const GENRE_FIND_ALL: Endpoint = public(Verb::Get, "/genre", "List genres");
pub const GENRE_FIND_ONE: Endpoint = public(Verb::Get, "/genre/{id}", "Get a genre");
pub const GENRE_CREATE: Endpoint = admin(Verb::Post, "/genre", "Create a genre");
pub const GENRE_DELETE: Endpoint = admin(Verb::Delete, "/genre/{id}", "Delete a genre");

pub const CINEMA_FIND_ALL: Endpoint = public(Verb::Get, "/cinema", "List cinemas");
pub const CINEMA_FIND_ONE: Endpoint = public(Verb::Get, "/cinema/{id}", "Get a cinema");
pub const CINEMA_CREATE: Endpoint = admin(Verb::Post, "/cinema", "Create a cinema");
pub const CINEMA_DELETE: Endpoint = admin(Verb::Delete, "/cinema/{id}", "Delete a cinema");

pub const HEALTH: Endpoint = public(Verb::Get, "/health", "Liveness probe");

/// An endpoint bound to its handler
pub struct Route {
    pub endpoint: Endpoint,
    handler: MethodRouter<AppState>,
}

impl Route {
    pub fn new<H, T>(endpoint: Endpoint, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        Self {
            endpoint,
            handler: on(endpoint.verb.filter(), handler),
        }
    }
}

pub fn routes() -> Vec<Route> {
    vec![
        Route::new(MOVIE_FIND_ALL, movie::find_all),
        Route::new(MOVIE_FIND_ONE_TMDB, movie::find_one_tmdb),
        Route::new(MOVIE_CREATE, movie::create),
        Route::new(MOVIE_ATTACH_GENRE, movie::attach_genre),
        Route::new(MOVIE_DETACH_GENRE, movie::detach_genre),
        Route::new(MOVIE_SEARCH, movie::search),
        Route::new(MOVIE_FIND_ONE, movie::find_one),
        Route::new(MOVIE_UPDATE, movie::update),
        Route::new(MOVIE_DELETE, movie::delete),
        Route::new(SCREENING_FIND_ALL, screening::find_all),
        Route::new(SCREENING_FIND_ONE, screening::find_one),
        Route::new(SCREENING_CREATE, screening::create),
        Route::new(SCREENING_UPDATE, screening::update),
        Route::new(SCREENING_DELETE, screening::delete),
        Route::new(GENRE_FIND_ALL, genre::find_all),
        Route::new(GENRE_FIND_ONE, genre::find_one),
        Route::new(GENRE_CREATE, genre::create),
        Route::new(GENRE_DELETE, genre::delete),
        Route::new(CINEMA_FIND_ALL, cinema::find_all),
        Route::new(CINEMA_FIND_ONE, cinema::find_one),
        Route::new(CINEMA_CREATE, cinema::create),
        Route::new(CINEMA_DELETE, cinema::delete),
        Route::new(HEALTH, system::health),
    ]
}

/// Register every route on `router`.
/// Routes sharing a path are merged by axum into one method router.
pub fn mount(
    router: Router<AppState>,
    routes: Vec<Route>,
    keys: Arc<JwtKeys>,
) -> Router<AppState> {
    routes.into_iter().fold(router, |router, route| {
        let Route { endpoint, handler } = route;
        let handler = match endpoint.role {
            Some(role) => handler.route_layer(middleware::from_fn_with_state(
                RoleGuard::new(Arc::clone(&keys), role),
                require_role,
            )),
            None => handler,
        };

        tracing::debug!(
            "Mounted {:?} {} ({}){}",
            endpoint.verb,
            endpoint.path,
            endpoint.summary,
            endpoint
                .role
                .map(|r| format!(" requires {}", r))
                .unwrap_or_default()
        );
        router.route(endpoint.path, handler)
    })
}
