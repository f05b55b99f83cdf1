use crate::DbError;
use core_types::{City, Temperature};
use std::future::Future;

/// The persistence operations the request handlers rely on.
///
/// Every call is a single round trip to the store; nothing spans more than
/// one entity, so no transactions are involved. The handlers receive an
/// implementation at construction time, which lets tests run against an
/// isolated in-memory store.
pub trait WeatherStore: Send + Sync + 'static {
    /// Inserts a new city and returns it with the id assigned by the store.
    fn insert_city(&self, city: City) -> impl Future<Output = Result<City, DbError>> + Send;

    /// Overwrites every field of the city identified by `city.id`.
    ///
    /// Fails with `DbError::NotFound` when no such city exists.
    fn update_city(&self, city: &City) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Fetches a single city by id.
    fn read_city(&self, id: i32) -> impl Future<Output = Result<City, DbError>> + Send;

    /// Deletes a city and returns the values it had before deletion.
    ///
    /// The row is read first; if that fails the delete is not attempted.
    fn delete_city(&self, id: i32) -> impl Future<Output = Result<City, DbError>> + Send;

    /// Inserts a measurement and returns it with the id assigned by the store.
    fn insert_temperature(
        &self,
        temperature: Temperature,
    ) -> impl Future<Output = Result<Temperature, DbError>> + Send;
}
