use crate::{DbError, WeatherStore};
use core_types::{City, Temperature};
use sqlx::postgres::PgPool;

/// The `DbRepository` provides the PostgreSQL implementation of `WeatherStore`.
/// It encapsulates all SQL queries and row mapping.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Removes every row from the service tables and restarts their id sequences.
    ///
    /// Used to give integration tests a known starting point.
    pub async fn reset(&self) -> Result<(), DbError> {
        for table in ["cities", "temperatures", "webhooks"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&self.pool)
                .await?;
            sqlx::query(&format!("ALTER SEQUENCE {table}_id_seq RESTART"))
                .execute(&self.pool)
                .await?;
        }
        tracing::info!("Service tables cleared.");
        Ok(())
    }

    /// Closes every connection in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl WeatherStore for DbRepository {
    async fn insert_city(&self, mut city: City) -> Result<City, DbError> {
        city.id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO cities (name, latitude, longitude) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&city.name)
        .bind(city.latitude)
        .bind(city.longitude)
        .fetch_one(&self.pool)
        .await?;
        Ok(city)
    }

    async fn update_city(&self, city: &City) -> Result<(), DbError> {
        let result =
            sqlx::query("UPDATE cities SET name = $1, latitude = $2, longitude = $3 WHERE id = $4")
                .bind(&city.name)
                .bind(city.latitude)
                .bind(city.longitude)
                .bind(city.id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound { entity: "City", id: city.id });
        }
        Ok(())
    }

    async fn read_city(&self, id: i32) -> Result<City, DbError> {
        sqlx::query_as::<_, City>("SELECT id, name, latitude, longitude FROM cities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound { entity: "City", id })
    }

    async fn delete_city(&self, id: i32) -> Result<City, DbError> {
        let city = self.read_city(id).await?;

        sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(city)
    }

    async fn insert_temperature(&self, mut temperature: Temperature) -> Result<Temperature, DbError> {
        temperature.id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO temperatures (city_id, max_cels, min_cels, time_unix)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(temperature.city_id)
        .bind(temperature.max_c)
        .bind(temperature.min_c)
        .bind(temperature.timestamp)
        .fetch_one(&self.pool)
        .await?;
        Ok(temperature)
    }
}
