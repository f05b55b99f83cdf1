//! Entities shared by every layer of the weather service.
//!
//! `City` and `Temperature` are the two persisted records. Both carry a
//! `validate` method that is checked before anything reaches the database;
//! validation only inspects the entity and never corrects it.

pub mod entities;
pub mod error;

// Re-export the core types to provide a clean public API.
pub use entities::{
    City, Temperature, MAX_ABS_LATITUDE, MAX_ABS_LONGITUDE, MAX_TEMPERATURE_C, MIN_TEMPERATURE_C,
};
pub use error::ValidationError;
