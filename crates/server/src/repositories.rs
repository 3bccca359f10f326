mod cinema;
mod genre;
mod movie;
mod screening;

pub use cinema::CinemaRepository;
pub use genre::GenreRepository;
pub use movie::MovieRepository;
pub use screening::{NewScreening, ScreeningChanges, ScreeningRepository};
