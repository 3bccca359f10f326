mod cinema;
mod genre;
mod movie;
mod pagination;
mod screening;

pub use cinema::{Cinema, CreateCinema};
pub use genre::{CreateGenre, Genre};
pub use movie::{CreateMovie, Movie, UpdateMovie};
pub use pagination::PaginationQuery;
pub use screening::{CreateScreening, Screening, ScreeningFilter, UpdateScreening};
