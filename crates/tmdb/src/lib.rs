mod client;
mod error;
mod movie;
pub mod models;

pub use client::TmdbClient;
pub use error::TmdbError;
pub use models::{Genre, MovieDetails, ProductionCompany, SpokenLanguage};

pub type Result<T> = std::result::Result<T, TmdbError>;
