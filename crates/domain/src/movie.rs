//! Movie value objects.

use thiserror::Error;

const MAX_QUERY_LEN: usize = 200;

/// Error when a movie field or search query is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MovieFieldError {
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Search query cannot be empty")]
    EmptyQuery,
    #[error("Search query cannot exceed {MAX_QUERY_LEN} characters")]
    QueryTooLong,
    #[error("Runtime must not be negative, got {0}")]
    NegativeRuntime(i64),
    #[error("TMDB id must be positive, got {0}")]
    InvalidTmdbId(i64),
}

/// Validate a TMDB id taken from a request path.
pub fn validate_tmdb_id(id: i64) -> Result<i64, MovieFieldError> {
    if id < 1 {
        return Err(MovieFieldError::InvalidTmdbId(id));
    }
    Ok(id)
}

/// Trim a title and reject blank ones.
pub fn validate_title(title: &str) -> Result<String, MovieFieldError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(MovieFieldError::EmptyTitle);
    }
    Ok(title.to_string())
}

/// A title search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(query: &str) -> Result<Self, MovieFieldError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MovieFieldError::EmptyQuery);
        }
        if query.chars().count() > MAX_QUERY_LEN {
            return Err(MovieFieldError::QueryTooLong);
        }
        Ok(Self(query.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased substring `LIKE` pattern with `\` as the escape character.
    ///
    /// Matched against columns lowercased the same way, since SQLite only
    /// folds ASCII case.
    pub fn like_pattern(&self) -> String {
        let query = self.0.to_lowercase();
        let mut pattern = String::with_capacity(query.len() + 2);
        pattern.push('%');
        for c in query.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}
