use crate::error::DbError;
use configuration::DbConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use std::time::Duration;

const CREATE_CITIES: &str = r#"
    CREATE TABLE IF NOT EXISTS cities (
        id        SERIAL PRIMARY KEY,
        name      VARCHAR(128) NOT NULL,
        latitude  DOUBLE PRECISION NOT NULL,
        longitude DOUBLE PRECISION NOT NULL
    )
"#;

const CREATE_TEMPERATURES: &str = r#"
    CREATE TABLE IF NOT EXISTS temperatures (
        id        SERIAL PRIMARY KEY,
        city_id   INTEGER NOT NULL,
        max_cels  REAL NOT NULL,
        min_cels  REAL NOT NULL,
        time_unix BIGINT NOT NULL
    )
"#;

// Created for future webhook registration; no handler writes to it yet.
const CREATE_WEBHOOKS: &str = r#"
    CREATE TABLE IF NOT EXISTS webhooks (
        id           SERIAL PRIMARY KEY,
        city_id      INTEGER,
        callback_url VARCHAR(1024) NOT NULL
    )
"#;

/// Builds the PostgreSQL connection options from the `[db]` configuration section.
pub fn connect_options(config: &DbConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.pass)
        .database(&config.dbname)
        .ssl_mode(PgSslMode::Disable)
}

/// Establishes a connection pool to the PostgreSQL database.
///
/// The pool is created once at startup and handed to `DbRepository`; nothing
/// in the service holds it as global state.
pub async fn connect(config: &DbConfig) -> Result<PgPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(connect_options(config))
        .await?;

    tracing::debug!(instance = %config, "Connected to PostgreSQL.");
    Ok(pool)
}

/// Creates the service tables if they do not exist yet.
///
/// There are no migrations beyond this: an existing table is left untouched.
pub async fn prepare_schema(pool: &PgPool) -> Result<(), DbError> {
    for (table, statement) in [
        ("cities", CREATE_CITIES),
        ("temperatures", CREATE_TEMPERATURES),
        ("webhooks", CREATE_WEBHOOKS),
    ] {
        sqlx::query(statement).execute(pool).await.map_err(|e| {
            tracing::error!(table, error = %e, "CREATE TABLE failed.");
            DbError::from(e)
        })?;
    }
    Ok(())
}
