use sqlx::SqlitePool;

use crate::models::Cinema;

const SELECT_CINEMA: &str = "SELECT id, name, address, city, created_at FROM cinema";

pub struct CinemaRepository;

impl CinemaRepository {
    pub async fn create(
        pool: &SqlitePool,
        name: &str,
        address: Option<&str>,
        city: &str,
    ) -> Result<Cinema, sqlx::Error> {
        sqlx::query_as::<_, Cinema>(
            r#"
            INSERT INTO cinema (name, address, city)
            VALUES ($1, $2, $3)
            RETURNING id, name, address, city, created_at
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(city)
        .fetch_one(pool)
        .await
    }

    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Cinema>, sqlx::Error> {
        let query = format!("{} WHERE id = $1", SELECT_CINEMA);
        sqlx::query_as::<_, Cinema>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM cinema")
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &SqlitePool, skip: i64, take: i64) -> Result<Vec<Cinema>, sqlx::Error> {
        let query = format!("{} ORDER BY id LIMIT $1 OFFSET $2", SELECT_CINEMA);
        sqlx::query_as::<_, Cinema>(&query)
            .bind(take)
            .bind(skip)
            .fetch_all(pool)
            .await
    }

    /// Delete a cinema. Fails with a foreign key violation while screenings reference it.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cinema WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    #[tokio::test]
    async fn test_cinema_crud() {
        let pool = memory_pool().await;
        let cinema = CinemaRepository::create(&pool, "Odeon", None, "Leeds")
            .await
            .unwrap();
        CinemaRepository::create(&pool, "Rex", Some("1 High St"), "Berkhamsted")
            .await
            .unwrap();

        assert_eq!(CinemaRepository::count(&pool).await.unwrap(), 2);
        let page = CinemaRepository::list(&pool, 1, 10).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].address.as_deref(), Some("1 High St"));

        assert!(CinemaRepository::delete(&pool, cinema.id).await.unwrap());
        assert!(!CinemaRepository::delete(&pool, cinema.id).await.unwrap());
        assert!(CinemaRepository::get_by_id(&pool, cinema.id)
            .await
            .unwrap()
            .is_none());
    }
}
