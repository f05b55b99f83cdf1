//! # Weather Service Database Crate
//!
//! This crate is the persistence gateway of the service. It turns validated
//! entities into SQL against PostgreSQL and maps rows back into entities.
//!
//! ## Public API
//!
//! - `connect`: Opens the connection pool from the `[db]` configuration section.
//! - `prepare_schema`: Creates the `cities`, `temperatures` and `webhooks` tables if needed.
//! - `WeatherStore`: The gateway operations the request handlers depend on.
//! - `DbRepository`: The PostgreSQL implementation of `WeatherStore`.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, connect_options, prepare_schema};
pub use error::DbError;
pub use repository::DbRepository;
pub use store::WeatherStore;
