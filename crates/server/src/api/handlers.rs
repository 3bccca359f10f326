pub mod cinema;
pub mod genre;
pub mod movie;
pub mod screening;
pub mod system;
