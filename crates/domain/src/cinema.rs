//! Cinema creation request.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateCinemaError {
    #[error("Cinema name cannot be empty")]
    EmptyName,
    #[error("Cinema city cannot be empty")]
    EmptyCity,
}

/// Request to create a cinema.
#[derive(Debug, Clone)]
pub struct CreateCinemaRequest {
    pub name: String,
    pub address: Option<String>,
    pub city: String,
}

impl CreateCinemaRequest {
    pub fn new(name: &str, address: Option<&str>, city: &str) -> Result<Self, CreateCinemaError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CreateCinemaError::EmptyName);
        }
        let city = city.trim();
        if city.is_empty() {
            return Err(CreateCinemaError::EmptyCity);
        }

        Ok(Self {
            name: name.to_string(),
            address: address
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string),
            city: city.to_string(),
        })
    }
}
