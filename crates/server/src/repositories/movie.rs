use chrono::{DateTime, NaiveDate, Utc};
use domain::GenreIds;
use sqlx::SqlitePool;

use super::GenreRepository;
use crate::models::{CreateMovie, Movie, UpdateMovie};

/// Common SELECT fields for movie queries
const SELECT_MOVIE: &str = r#"
    SELECT
        id, tmdb_id, title, original_title,
        overview, tagline, release_date, runtime,
        poster_path, backdrop_path, original_language, vote_average,
        created_at, updated_at
    FROM movie
"#;

/// Title filter for search queries; `$1` is an escaped, lowercased LIKE pattern
const SEARCH_FILTER: &str = r#"
    WHERE title_search LIKE $1 ESCAPE '\'
       OR original_title_search LIKE $1 ESCAPE '\'
"#;

pub struct MovieRepository;

impl MovieRepository {
    /// Create a new movie
    pub async fn create(pool: &SqlitePool, data: CreateMovie) -> Result<Movie, sqlx::Error> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO movie (
                tmdb_id, title, original_title,
                overview, tagline, release_date, runtime,
                poster_path, backdrop_path, original_language, vote_average,
                title_search, original_title_search
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            "#,
        )
        .bind(data.tmdb_id)
        .bind(&data.title)
        .bind(&data.original_title)
        .bind(&data.overview)
        .bind(&data.tagline)
        .bind(data.release_date)
        .bind(data.runtime)
        .bind(&data.poster_path)
        .bind(&data.backdrop_path)
        .bind(&data.original_language)
        .bind(data.vote_average)
        .bind(data.title.to_lowercase())
        .bind(data.original_title.to_lowercase())
        .fetch_one(pool)
        .await?;

        Self::get_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Get a movie by ID, with its genres
    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("{} WHERE id = $1", SELECT_MOVIE);
        let row = sqlx::query_as::<_, MovieRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match row {
            Some(row) => Ok(Self::with_genres(pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Get a movie by TMDB ID
    pub async fn get_by_tmdb_id(
        pool: &SqlitePool,
        tmdb_id: i64,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("{} WHERE tmdb_id = $1", SELECT_MOVIE);
        let row = sqlx::query_as::<_, MovieRow>(&query)
            .bind(tmdb_id)
            .fetch_optional(pool)
            .await?;

        match row {
            Some(row) => Ok(Self::with_genres(pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Count all movies
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM movie")
            .fetch_one(pool)
            .await
    }

    /// List movies ordered by ID
    pub async fn list(pool: &SqlitePool, skip: i64, take: i64) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!("{} ORDER BY id LIMIT $1 OFFSET $2", SELECT_MOVIE);
        let rows = sqlx::query_as::<_, MovieRow>(&query)
            .bind(take)
            .bind(skip)
            .fetch_all(pool)
            .await?;

        Self::with_genres(pool, rows).await
    }

    /// Count movies whose title matches the LIKE pattern
    pub async fn count_search(pool: &SqlitePool, pattern: &str) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM movie {}", SEARCH_FILTER);
        sqlx::query_scalar(&query).bind(pattern).fetch_one(pool).await
    }

    /// List movies whose title matches the LIKE pattern, ordered by ID
    pub async fn search(
        pool: &SqlitePool,
        pattern: &str,
        skip: i64,
        take: i64,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "{} {} ORDER BY id LIMIT $2 OFFSET $3",
            SELECT_MOVIE, SEARCH_FILTER
        );
        let rows = sqlx::query_as::<_, MovieRow>(&query)
            .bind(pattern)
            .bind(take)
            .bind(skip)
            .fetch_all(pool)
            .await?;

        Self::with_genres(pool, rows).await
    }

    /// Update a movie
    /// Uses CASE/COALESCE so a single statement applies the partial update
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        data: UpdateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let overview_update = data.overview.should_update();
        let tagline_update = data.tagline.should_update();
        let release_date_update = data.release_date.should_update();
        let runtime_update = data.runtime.should_update();
        let poster_path_update = data.poster_path.should_update();
        let backdrop_path_update = data.backdrop_path.should_update();
        let original_language_update = data.original_language.should_update();
        let title_search = data.title.as_deref().map(str::to_lowercase);
        let original_title_search = data.original_title.as_deref().map(str::to_lowercase);

        let result = sqlx::query(
            r#"
            UPDATE movie SET
                title = COALESCE($1, title),
                original_title = COALESCE($2, original_title),
                overview = CASE WHEN $3 THEN $4 ELSE overview END,
                tagline = CASE WHEN $5 THEN $6 ELSE tagline END,
                release_date = CASE WHEN $7 THEN $8 ELSE release_date END,
                runtime = CASE WHEN $9 THEN $10 ELSE runtime END,
                poster_path = CASE WHEN $11 THEN $12 ELSE poster_path END,
                backdrop_path = CASE WHEN $13 THEN $14 ELSE backdrop_path END,
                original_language = CASE WHEN $15 THEN $16 ELSE original_language END,
                vote_average = COALESCE($17, vote_average),
                title_search = COALESCE($19, title_search),
                original_title_search = COALESCE($20, original_title_search),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $18
            "#,
        )
        .bind(&data.title)
        .bind(&data.original_title)
        .bind(overview_update)
        .bind(data.overview.into_value())
        .bind(tagline_update)
        .bind(data.tagline.into_value())
        .bind(release_date_update)
        .bind(data.release_date.into_value())
        .bind(runtime_update)
        .bind(data.runtime.into_value())
        .bind(poster_path_update)
        .bind(data.poster_path.into_value())
        .bind(backdrop_path_update)
        .bind(data.backdrop_path.into_value())
        .bind(original_language_update)
        .bind(data.original_language.into_value())
        .bind(data.vote_average)
        .bind(id)
        .bind(title_search)
        .bind(original_title_search)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Self::get_by_id(pool, id).await
    }

    /// Delete a movie by ID
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movie WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Link genres to a movie, skipping links that already exist.
    /// Returns the number of links created.
    pub async fn attach_genres(
        pool: &SqlitePool,
        movie_id: i64,
        genre_ids: &GenreIds,
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut created = 0;

        for genre_id in genre_ids.iter() {
            let result = sqlx::query(
                "INSERT OR IGNORE INTO movie_genre (movie_id, genre_id) VALUES ($1, $2)",
            )
            .bind(movie_id)
            .bind(genre_id)
            .execute(&mut *tx)
            .await?;
            created += result.rows_affected();
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Unlink genres from a movie, ignoring genres that are not linked.
    /// Returns the number of links removed.
    pub async fn detach_genres(
        pool: &SqlitePool,
        movie_id: i64,
        genre_ids: &GenreIds,
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut removed = 0;

        for genre_id in genre_ids.iter() {
            let result =
                sqlx::query("DELETE FROM movie_genre WHERE movie_id = $1 AND genre_id = $2")
                    .bind(movie_id)
                    .bind(genre_id)
                    .execute(&mut *tx)
                    .await?;
            removed += result.rows_affected();
        }

        tx.commit().await?;
        Ok(removed)
    }

    async fn with_genres(
        pool: &SqlitePool,
        rows: Vec<MovieRow>,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut genres = GenreRepository::get_by_movie_ids(pool, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let movie_genres = genres.remove(&row.id).unwrap_or_default();
                row.into_movie(movie_genres)
            })
            .collect())
    }
}

/// Internal row type for mapping SQLite results
#[derive(Debug, sqlx::FromRow)]
struct MovieRow {
    id: i64,
    tmdb_id: i64,
    title: String,
    original_title: String,
    overview: Option<String>,
    tagline: Option<String>,
    release_date: Option<NaiveDate>,
    runtime: Option<i64>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    original_language: Option<String>,
    vote_average: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MovieRow {
    fn into_movie(self, genres: Vec<crate::models::Genre>) -> Movie {
        Movie {
            id: self.id,
            tmdb_id: self.tmdb_id,
            title: self.title,
            original_title: self.original_title,
            overview: self.overview,
            tagline: self.tagline,
            release_date: self.release_date,
            runtime: self.runtime,
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            original_language: self.original_language,
            vote_average: self.vote_average,
            created_at: self.created_at,
            updated_at: self.updated_at,
            genres,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use domain::{Clearable, SearchQuery};

    fn sample(tmdb_id: i64, title: &str) -> CreateMovie {
        CreateMovie {
            tmdb_id,
            title: title.to_string(),
            original_title: title.to_string(),
            overview: Some(format!("About {}", title)),
            tagline: None,
            release_date: NaiveDate::from_ymd_opt(1999, 3, 30),
            runtime: Some(120),
            poster_path: None,
            backdrop_path: None,
            original_language: Some("en".to_string()),
            vote_average: 7.5,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_movie() {
        let pool = memory_pool().await;
        let created = MovieRepository::create(&pool, sample(603, "The Matrix"))
            .await
            .unwrap();

        let fetched = MovieRepository::get_by_id(&pool, created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.tmdb_id, 603);
        assert_eq!(fetched.release_date, NaiveDate::from_ymd_opt(1999, 3, 30));
        assert!(fetched.genres.is_empty());

        let by_tmdb = MovieRepository::get_by_tmdb_id(&pool, 603).await.unwrap();
        assert_eq!(by_tmdb.map(|m| m.id), Some(created.id));
    }

    #[tokio::test]
    async fn test_list_orders_by_id_and_pages() {
        let pool = memory_pool().await;
        for (tmdb_id, title) in [(1, "A"), (2, "B"), (3, "C")] {
            MovieRepository::create(&pool, sample(tmdb_id, title))
                .await
                .unwrap();
        }

        assert_eq!(MovieRepository::count(&pool).await.unwrap(), 3);
        let page: Vec<String> = MovieRepository::list(&pool, 1, 2)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(page, vec!["B", "C"]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_escapes_wildcards() {
        let pool = memory_pool().await;
        MovieRepository::create(&pool, sample(1, "The Matrix")).await.unwrap();
        MovieRepository::create(&pool, sample(2, "The Matrix Reloaded")).await.unwrap();
        MovieRepository::create(&pool, sample(3, "Heat")).await.unwrap();

        let pattern = SearchQuery::new("matrix").unwrap().like_pattern();
        assert_eq!(MovieRepository::count_search(&pool, &pattern).await.unwrap(), 2);
        let found = MovieRepository::search(&pool, &pattern, 0, 10).await.unwrap();
        assert_eq!(found.len(), 2);

        let wildcard = SearchQuery::new("%").unwrap().like_pattern();
        assert_eq!(MovieRepository::count_search(&pool, &wildcard).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_case() {
        let pool = memory_pool().await;
        let amelie = MovieRepository::create(
            &pool,
            sample(194, "LE FABULEUX DESTIN D'AMÉLIE POULAIN"),
        )
        .await
        .unwrap();
        MovieRepository::create(&pool, sample(2, "ÉLITE")).await.unwrap();

        let pattern = SearchQuery::new("amélie").unwrap().like_pattern();
        let found = MovieRepository::search(&pool, &pattern, 0, 10).await.unwrap();
        assert_eq!(found.iter().map(|m| m.id).collect::<Vec<_>>(), vec![amelie.id]);

        let pattern = SearchQuery::new("élite").unwrap().like_pattern();
        assert_eq!(MovieRepository::count_search(&pool, &pattern).await.unwrap(), 1);

        // Renaming keeps the search columns in step with the title.
        let update = UpdateMovie {
            title: Some("ÖSTERREICH".to_string()),
            ..Default::default()
        };
        MovieRepository::update(&pool, amelie.id, update).await.unwrap();
        let pattern = SearchQuery::new("österreich").unwrap().like_pattern();
        assert_eq!(MovieRepository::count_search(&pool, &pattern).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_applies_partial_changes() {
        let pool = memory_pool().await;
        let movie = MovieRepository::create(&pool, sample(1, "Heat")).await.unwrap();

        let update = UpdateMovie {
            tagline: Clearable::Set("A Los Angeles crime saga".to_string()),
            overview: Clearable::Clear,
            runtime: Clearable::Set(170),
            ..Default::default()
        };
        let updated = MovieRepository::update(&pool, movie.id, update)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Heat");
        assert_eq!(updated.tagline.as_deref(), Some("A Los Angeles crime saga"));
        assert_eq!(updated.overview, None);
        assert_eq!(updated.runtime, Some(170));
        assert_eq!(updated.original_language.as_deref(), Some("en"));

        let missing = MovieRepository::update(&pool, 999, UpdateMovie::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_attach_is_idempotent_and_detach_ignores_unlinked() {
        let pool = memory_pool().await;
        let movie = MovieRepository::create(&pool, sample(1, "Heat")).await.unwrap();
        let action = GenreRepository::create(&pool, "Action").await.unwrap();
        let crime = GenreRepository::create(&pool, "Crime").await.unwrap();

        let ids = GenreIds::new([action.id]).unwrap();
        assert_eq!(MovieRepository::attach_genres(&pool, movie.id, &ids).await.unwrap(), 1);
        assert_eq!(MovieRepository::attach_genres(&pool, movie.id, &ids).await.unwrap(), 0);

        let unlinked = GenreIds::new([crime.id]).unwrap();
        assert_eq!(
            MovieRepository::detach_genres(&pool, movie.id, &unlinked).await.unwrap(),
            0
        );

        let movie = MovieRepository::get_by_id(&pool, movie.id).await.unwrap().unwrap();
        assert_eq!(movie.genres, vec![action]);
    }
}
