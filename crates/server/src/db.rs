use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Schema statements, applied in order on startup.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS movie (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        tmdb_id INTEGER NOT NULL UNIQUE,
        title TEXT NOT NULL,
        original_title TEXT NOT NULL,
        -- Unicode-lowercased titles for search
        title_search TEXT NOT NULL DEFAULT '',
        original_title_search TEXT NOT NULL DEFAULT '',
        overview TEXT,
        tagline TEXT,
        release_date TEXT,
        runtime INTEGER,
        poster_path TEXT,
        backdrop_path TEXT,
        original_language TEXT,
        vote_average REAL NOT NULL DEFAULT 0,
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS genre (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE COLLATE NOCASE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS movie_genre (
        movie_id INTEGER NOT NULL REFERENCES movie(id) ON DELETE CASCADE,
        genre_id INTEGER NOT NULL REFERENCES genre(id) ON DELETE CASCADE,
        PRIMARY KEY (movie_id, genre_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_movie_genre_genre ON movie_genre(genre_id)",
    r#"
    CREATE TABLE IF NOT EXISTS cinema (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        address TEXT,
        city TEXT NOT NULL,
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS screening (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        starts_at DATETIME NOT NULL,
        ends_at DATETIME NOT NULL,
        active BOOLEAN NOT NULL DEFAULT TRUE,
        available_seats INTEGER NOT NULL CHECK (available_seats >= 0),
        movie_id INTEGER NOT NULL REFERENCES movie(id) ON DELETE RESTRICT,
        cinema_id INTEGER NOT NULL REFERENCES cinema(id) ON DELETE RESTRICT,
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        CHECK (starts_at < ends_at)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_screening_movie ON screening(movie_id)",
    "CREATE INDEX IF NOT EXISTS idx_screening_cinema ON screening(cinema_id)",
];

pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Create tables and indexes that do not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!("Database schema ready ({} statements)", SCHEMA.len());
    Ok(())
}

/// Single-connection in-memory pool for tests.
#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid in-memory url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("in-memory pool");

    init_schema(&pool).await.expect("schema");
    pool
}
