use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::{Screening, ScreeningFilter};

const SELECT_SCREENING: &str = r#"
    SELECT
        id, starts_at, ends_at, active, available_seats,
        movie_id, cinema_id, created_at, updated_at
    FROM screening
"#;

/// Optional movie/cinema filter; `$1` is the movie, `$2` the cinema
const FILTER: &str = "WHERE ($1 IS NULL OR movie_id = $1) AND ($2 IS NULL OR cinema_id = $2)";

/// Validated values for a new screening row
#[derive(Debug, Clone)]
pub struct NewScreening {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub active: bool,
    pub available_seats: i64,
    pub movie_id: i64,
    pub cinema_id: i64,
}

/// Validated values for a screening update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct ScreeningChanges {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub active: Option<bool>,
    pub available_seats: Option<i64>,
}

pub struct ScreeningRepository;

impl ScreeningRepository {
    pub async fn create(pool: &SqlitePool, data: NewScreening) -> Result<Screening, sqlx::Error> {
        let query = r#"
            INSERT INTO screening (starts_at, ends_at, active, available_seats, movie_id, cinema_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING
                id, starts_at, ends_at, active, available_seats,
                movie_id, cinema_id, created_at, updated_at
        "#;

        let row = sqlx::query_as::<_, ScreeningRow>(query)
            .bind(data.start)
            .bind(data.end)
            .bind(data.active)
            .bind(data.available_seats)
            .bind(data.movie_id)
            .bind(data.cinema_id)
            .fetch_one(pool)
            .await?;

        Ok(row.into())
    }

    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Screening>, sqlx::Error> {
        let query = format!("{} WHERE id = $1", SELECT_SCREENING);
        let row = sqlx::query_as::<_, ScreeningRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(Into::into))
    }

    pub async fn count(pool: &SqlitePool, filter: &ScreeningFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM screening {}", FILTER);
        sqlx::query_scalar(&query)
            .bind(filter.movie_id)
            .bind(filter.cinema_id)
            .fetch_one(pool)
            .await
    }

    /// List screenings ordered by start time
    pub async fn list(
        pool: &SqlitePool,
        filter: &ScreeningFilter,
        skip: i64,
        take: i64,
    ) -> Result<Vec<Screening>, sqlx::Error> {
        let query = format!(
            "{} {} ORDER BY starts_at, id LIMIT $3 OFFSET $4",
            SELECT_SCREENING, FILTER
        );
        let rows = sqlx::query_as::<_, ScreeningRow>(&query)
            .bind(filter.movie_id)
            .bind(filter.cinema_id)
            .bind(take)
            .bind(skip)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        changes: ScreeningChanges,
    ) -> Result<Option<Screening>, sqlx::Error> {
        let query = r#"
            UPDATE screening SET
                starts_at = COALESCE($1, starts_at),
                ends_at = COALESCE($2, ends_at),
                active = COALESCE($3, active),
                available_seats = COALESCE($4, available_seats),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $5
            RETURNING
                id, starts_at, ends_at, active, available_seats,
                movie_id, cinema_id, created_at, updated_at
        "#;

        let row = sqlx::query_as::<_, ScreeningRow>(query)
            .bind(changes.start)
            .bind(changes.end)
            .bind(changes.active)
            .bind(changes.available_seats)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(Into::into))
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM screening WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ScreeningRow {
    id: i64,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    active: bool,
    available_seats: i64,
    movie_id: i64,
    cinema_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ScreeningRow> for Screening {
    fn from(row: ScreeningRow) -> Self {
        Self {
            id: row.id,
            start: row.starts_at,
            end: row.ends_at,
            active: row.active,
            available_seats: row.available_seats,
            movie_id: row.movie_id,
            cinema_id: row.cinema_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::db::memory_pool;

    /// Insert a movie and a cinema, returning their IDs
    async fn seed(pool: &SqlitePool) -> (i64, i64) {
        let movie_id: i64 = sqlx::query_scalar(
            "INSERT INTO movie (tmdb_id, title, original_title) \
             VALUES (603, 'The Matrix', 'The Matrix') RETURNING id",
        )
        .fetch_one(pool)
        .await
        .unwrap();
        let cinema_id: i64 = sqlx::query_scalar(
            "INSERT INTO cinema (name, city) VALUES ('Odeon', 'Leeds') RETURNING id",
        )
        .fetch_one(pool)
        .await
        .unwrap();
        (movie_id, cinema_id)
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    fn new_screening(movie_id: i64, cinema_id: i64, hour: u32) -> NewScreening {
        NewScreening {
            start: at(hour),
            end: at(hour + 2),
            active: true,
            available_seats: 80,
            movie_id,
            cinema_id,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_screening() {
        let pool = memory_pool().await;
        let (movie_id, cinema_id) = seed(&pool).await;

        let created = ScreeningRepository::create(&pool, new_screening(movie_id, cinema_id, 18))
            .await
            .unwrap();
        assert_eq!(created.start, at(18));
        assert_eq!(created.end, at(20));

        let fetched = ScreeningRepository::get_by_id(&pool, created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.available_seats, 80);
        assert_eq!(fetched.movie_id, movie_id);
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_by_start() {
        let pool = memory_pool().await;
        let (movie_id, cinema_id) = seed(&pool).await;
        ScreeningRepository::create(&pool, new_screening(movie_id, cinema_id, 20))
            .await
            .unwrap();
        ScreeningRepository::create(&pool, new_screening(movie_id, cinema_id, 10))
            .await
            .unwrap();

        let all = ScreeningFilter::default();
        assert_eq!(ScreeningRepository::count(&pool, &all).await.unwrap(), 2);
        let listed = ScreeningRepository::list(&pool, &all, 0, 10).await.unwrap();
        assert_eq!(listed[0].start, at(10));

        let other_movie = ScreeningFilter {
            movie_id: Some(movie_id + 1),
            cinema_id: None,
        };
        assert_eq!(ScreeningRepository::count(&pool, &other_movie).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_keeps_absent_fields() {
        let pool = memory_pool().await;
        let (movie_id, cinema_id) = seed(&pool).await;
        let created = ScreeningRepository::create(&pool, new_screening(movie_id, cinema_id, 18))
            .await
            .unwrap();

        let changes = ScreeningChanges {
            available_seats: Some(0),
            active: Some(false),
            ..Default::default()
        };
        let updated = ScreeningRepository::update(&pool, created.id, changes)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.available_seats, 0);
        assert!(!updated.active);
        assert_eq!(updated.start, at(18));
    }

    #[tokio::test]
    async fn test_referenced_movie_cannot_be_deleted() {
        let pool = memory_pool().await;
        let (movie_id, cinema_id) = seed(&pool).await;
        ScreeningRepository::create(&pool, new_screening(movie_id, cinema_id, 18))
            .await
            .unwrap();

        let err = sqlx::query("DELETE FROM movie WHERE id = $1")
            .bind(movie_id)
            .execute(&pool)
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_database_error().map(|e| e.kind()),
            Some(sqlx::error::ErrorKind::ForeignKeyViolation)
        ));
    }
}
