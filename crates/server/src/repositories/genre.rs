use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::models::Genre;

pub struct GenreRepository;

impl GenreRepository {
    /// Create a new genre
    pub async fn create(pool: &SqlitePool, name: &str) -> Result<Genre, sqlx::Error> {
        sqlx::query_as::<_, Genre>(
            r#"
            INSERT INTO genre (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Get a genre by ID
    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Genre>, sqlx::Error> {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genre WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Get all genres ordered by name
    pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Genre>, sqlx::Error> {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genre ORDER BY name, id")
            .fetch_all(pool)
            .await
    }

    /// Delete a genre; links to movies go with it
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM genre WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Return the ids from `ids` that have no genre row
    pub async fn find_missing(pool: &SqlitePool, ids: &[i64]) -> Result<Vec<i64>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT id FROM genre WHERE id IN ({})",
            placeholders(ids.len())
        );
        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for id in ids {
            q = q.bind(id);
        }
        let existing: Vec<i64> = q.fetch_all(pool).await?;

        Ok(ids
            .iter()
            .copied()
            .filter(|id| !existing.contains(id))
            .collect())
    }

    /// Genres attached to each of the given movies, ordered by genre ID.
    /// Movies without genres are absent from the map.
    pub async fn get_by_movie_ids(
        pool: &SqlitePool,
        movie_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Genre>>, sqlx::Error> {
        if movie_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let query = format!(
            r#"
            SELECT mg.movie_id, g.id, g.name
            FROM movie_genre mg
            JOIN genre g ON g.id = mg.genre_id
            WHERE mg.movie_id IN ({})
            ORDER BY mg.movie_id, g.id
            "#,
            placeholders(movie_ids.len())
        );

        let mut q = sqlx::query_as::<_, (i64, i64, String)>(&query);
        for id in movie_ids {
            q = q.bind(id);
        }

        let rows = q.fetch_all(pool).await?;
        let mut map: HashMap<i64, Vec<Genre>> = HashMap::new();
        for (movie_id, id, name) in rows {
            map.entry(movie_id).or_default().push(Genre { id, name });
        }

        Ok(map)
    }
}

/// `$1,$2,...,$n` for an `IN (...)` list
pub(crate) fn placeholders(n: usize) -> String {
    (1..=n)
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(",")
}
