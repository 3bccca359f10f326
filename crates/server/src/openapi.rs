use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{cinema, genre, movie, screening, system};
use crate::error::ErrorBody;
use crate::models::{
    Cinema, CreateCinema, CreateGenre, CreateScreening, Genre, Movie, Screening, UpdateMovie,
    UpdateScreening,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cinema API",
        version = "1.0.0"
    ),
    paths(
        movie::find_all,
        movie::find_one_tmdb,
        movie::create,
        movie::attach_genre,
        movie::detach_genre,
        movie::search,
        movie::find_one,
        movie::update,
        movie::delete,
        screening::find_all,
        screening::find_one,
        screening::create,
        screening::update,
        screening::delete,
        genre::find_all,
        genre::find_one,
        genre::create,
        genre::delete,
        cinema::find_all,
        cinema::find_one,
        cinema::create,
        cinema::delete,
        system::health,
    ),
    tags(
        (name = "movie", description = "Movie catalogue and TMDB import"),
        (name = "screening", description = "Screenings of movies in cinemas"),
        (name = "genre", description = "Movie genres"),
        (name = "cinema", description = "Cinemas"),
        (name = "system", description = "Service health")
    ),
    components(schemas(
        Movie,
        UpdateMovie,
        Genre,
        CreateGenre,
        Screening,
        CreateScreening,
        UpdateScreening,
        Cinema,
        CreateCinema,
        ErrorBody,
        domain::PageMeta,
        domain::Role,
        tmdb::MovieDetails,
        tmdb::Genre,
        tmdb::ProductionCompany,
        tmdb::SpokenLanguage
    )),
    modifiers(&BearerAuth)
)]
pub struct ApiDoc;

/// Registers the `bearer` JWT scheme referenced by admin endpoints
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
