use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database request failed: {0}")]
    Store(#[from] sqlx::Error),

    #[error("{entity} with id={id} does not exist")]
    NotFound { entity: &'static str, id: i32 },
}
