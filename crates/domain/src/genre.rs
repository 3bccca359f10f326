//! Genre requests.

use std::collections::BTreeSet;

use thiserror::Error;

const MAX_NAME_LEN: usize = 64;

/// Most distinct genre ids accepted in one attach or detach request.
pub const MAX_IDS: usize = 100;

/// Error when a genre request is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenreError {
    #[error("Genre name cannot be empty")]
    EmptyName,
    #[error("Genre name cannot exceed {MAX_NAME_LEN} characters")]
    NameTooLong,
    #[error("At least one genre id is required")]
    NoIds,
    #[error("Genre id must be positive, got {0}")]
    InvalidId(i64),
    #[error("At most {MAX_IDS} genre ids are allowed per request")]
    TooManyIds,
}

/// A non-empty, de-duplicated set of genre ids taken from a request body.
///
/// Ids are kept sorted so link operations touch rows in a stable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreIds(BTreeSet<i64>);

impl GenreIds {
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Result<Self, GenreError> {
        let mut set = BTreeSet::new();
        for id in ids {
            if id < 1 {
                return Err(GenreError::InvalidId(id));
            }
            set.insert(id);
            if set.len() > MAX_IDS {
                return Err(GenreError::TooManyIds);
            }
        }
        if set.is_empty() {
            return Err(GenreError::NoIds);
        }
        Ok(Self(set))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }

    pub fn as_vec(&self) -> Vec<i64> {
        self.0.iter().copied().collect()
    }
}

/// Request to create a genre.
#[derive(Debug, Clone)]
pub struct CreateGenreRequest {
    pub name: String,
}

impl CreateGenreRequest {
    pub fn new(name: &str) -> Result<Self, GenreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GenreError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(GenreError::NameTooLong);
        }
        Ok(Self {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_ids_collapse_duplicates() {
        let ids = GenreIds::new([2, 1, 2, 1]).unwrap();
        assert_eq!(ids.as_vec(), vec![1, 2]);
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_genre_ids_rejects_empty_and_non_positive() {
        assert_eq!(GenreIds::new(Vec::new()), Err(GenreError::NoIds));
        assert_eq!(GenreIds::new([3, 0]), Err(GenreError::InvalidId(0)));
    }

    #[test]
    fn test_genre_ids_cap_counts_distinct_ids() {
        let at_cap = GenreIds::new((1..=MAX_IDS as i64).chain(1..=10)).unwrap();
        assert_eq!(at_cap.len(), MAX_IDS);
        assert_eq!(GenreIds::new(1..=250_001), Err(GenreError::TooManyIds));
    }

    #[test]
    fn test_create_genre_trims_name() {
        let request = CreateGenreRequest::new("  Science Fiction ").unwrap();
        assert_eq!(request.name, "Science Fiction");
        assert!(matches!(
            CreateGenreRequest::new("   "),
            Err(GenreError::EmptyName)
        ));
    }
}
