use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Cinema where screenings take place
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cinema {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub city: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a cinema
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCinema {
    pub name: String,
    pub address: Option<String>,
    pub city: String,
}
