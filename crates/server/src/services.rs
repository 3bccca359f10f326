mod cinema;
mod genre;
mod metadata;
mod movie;
mod screening;

pub use cinema::{CinemaService, CinemaServiceError};
pub use genre::{GenreService, GenreServiceError};
pub use metadata::{MovieMetadataProvider, TmdbProvider};
pub use movie::{MovieService, MovieServiceError};
pub use screening::{ScreeningService, ScreeningServiceError};
