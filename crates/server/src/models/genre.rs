use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Movie genre
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Request body for creating a genre
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateGenre {
    pub name: String,
}
