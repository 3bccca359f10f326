//! Domain layer for the cinema catalogue.
//!
//! Pure value objects and validated requests shared by the server: pagination
//! math, the role claim, genre id sets, screening windows and the
//! [`Clearable`] wrapper used by partial updates. Nothing in here performs
//! I/O; persistence and HTTP live in the `server` crate.

pub mod cinema;
pub mod genre;
pub mod movie;
pub mod pagination;
pub mod role;
pub mod screening;
pub mod shared;

pub use cinema::{CreateCinemaError, CreateCinemaRequest};
pub use genre::{CreateGenreRequest, GenreError, GenreIds, MAX_IDS};
pub use movie::{validate_title, validate_tmdb_id, MovieFieldError, SearchQuery};
pub use pagination::{paginate, PageMeta, PageRequest, Paginated, PaginationError};
pub use role::{Role, UnknownRole};
pub use screening::{
    validate_available_seats, CreateScreeningRequest, ScreeningError, ScreeningWindow,
};
pub use shared::*;
