//! Form fields and the path `id` segment.
//!
//! Fields may come from a form-encoded body, the query string, or both; the
//! body wins when a field is present in both. Parsing only turns text into
//! typed entities; semantic checks happen in `City::validate` /
//! `Temperature::validate`.

use crate::error::AppError;
use axum::extract::{
    rejection::{FormRejection, QueryRejection},
    Form, Query,
};
use core_types::{City, Temperature};
use serde::Deserialize;
use std::str::FromStr;

/// A set of optional form fields that can fill its gaps from another set.
pub trait FormFields: Default {
    /// Keeps every field of `self` that is present and takes the rest from `fallback`.
    fn or(self, fallback: Self) -> Self;
}

/// Combines the query-string fields with the body fields.
///
/// A body that is not form-encoded (or is absent) contributes no fields, so
/// a request carrying everything in the query string is accepted.
pub fn read_form<T: FormFields>(
    query: Result<Query<T>, QueryRejection>,
    body: Result<Form<T>, FormRejection>,
) -> Result<T, AppError> {
    let Query(query) = query?;
    let body = match body {
        Ok(Form(body)) => body,
        Err(FormRejection::InvalidFormContentType(rejection)) => {
            tracing::debug!(reason = %rejection, "Body is not form-encoded, using query fields only.");
            T::default()
        }
        Err(rejection) => return Err(rejection.into()),
    };
    Ok(body.or(query))
}

/// The `name`, `latitude`, `longitude` fields of POST /cities and PATCH /cities/{id}.
#[derive(Debug, Default, Deserialize)]
pub struct CityForm {
    pub name: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl FormFields for CityForm {
    fn or(self, fallback: Self) -> Self {
        Self {
            name: self.name.or(fallback.name),
            latitude: self.latitude.or(fallback.latitude),
            longitude: self.longitude.or(fallback.longitude),
        }
    }
}

impl CityForm {
    /// Builds an unsaved city (id `0`) from the form fields.
    ///
    /// A missing name is treated as empty and rejected by validation.
    pub fn into_city(self) -> Result<City, AppError> {
        let latitude = parse_field("latitude", self.latitude.as_deref())?;
        let longitude = parse_field("longitude", self.longitude.as_deref())?;
        Ok(City::new(self.name.unwrap_or_default(), latitude, longitude))
    }
}

/// The `city_id`, `max`, `min` fields of POST /temperatures.
#[derive(Debug, Default, Deserialize)]
pub struct TemperatureForm {
    pub city_id: Option<String>,
    pub max: Option<String>,
    pub min: Option<String>,
}

impl FormFields for TemperatureForm {
    fn or(self, fallback: Self) -> Self {
        Self {
            city_id: self.city_id.or(fallback.city_id),
            max: self.max.or(fallback.max),
            min: self.min.or(fallback.min),
        }
    }
}

impl TemperatureForm {
    /// Builds an unsaved measurement stamped with `timestamp`.
    pub fn into_temperature(self, timestamp: i64) -> Result<Temperature, AppError> {
        let city_id = parse_field("city_id", self.city_id.as_deref())?;
        let max_c = parse_field("max", self.max.as_deref())?;
        let min_c = parse_field("min", self.min.as_deref())?;
        Ok(Temperature::new(city_id, max_c, min_c, timestamp))
    }
}

/// Parses the `{id}` path segment. Only plain decimal digits are accepted.
pub fn parse_id(raw: &str) -> Result<i32, AppError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::parse("id", format!("{raw:?} is not a decimal id")));
    }
    raw.parse().map_err(|e| AppError::parse("id", e))
}

fn parse_field<T>(field: &'static str, raw: Option<&str>) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = raw.ok_or_else(|| AppError::parse(field, "missing"))?;
    raw.parse().map_err(|e| AppError::parse(field, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city_form(name: &str, latitude: Option<&str>, longitude: Option<&str>) -> CityForm {
        CityForm {
            name: Some(name.to_string()),
            latitude: latitude.map(str::to_string),
            longitude: longitude.map(str::to_string),
        }
    }

    #[test]
    fn test_city_form_parses_numbers() {
        let city = city_form("Moscow", Some("55.751"), Some("37.618")).into_city().unwrap();
        assert_eq!(city, City::new("Moscow", 55.751, 37.618));
    }

    #[test]
    fn test_city_form_rejects_missing_or_malformed_coordinates() {
        let err = city_form("Moscow", None, Some("37.618")).into_city().unwrap_err();
        assert!(matches!(err, AppError::Parse { field: "latitude", .. }));

        let err = city_form("Moscow", Some("55.751"), Some("east")).into_city().unwrap_err();
        assert!(matches!(err, AppError::Parse { field: "longitude", .. }));
    }

    #[test]
    fn test_city_form_does_not_validate() {
        // Out-of-range values parse fine; validation is a separate step.
        let city = city_form("", Some("91"), Some("0")).into_city().unwrap();
        assert!(city.validate().is_err());
    }

    #[test]
    fn test_body_fields_take_precedence_over_query() {
        let body = city_form("Berlin", Some("52.52"), None);
        let query = city_form("Moscow", Some("55.751"), Some("13.41"));
        let city = body.or(query).into_city().unwrap();
        assert_eq!(city, City::new("Berlin", 52.52, 13.41));
    }

    #[test]
    fn test_temperature_form() {
        let form = TemperatureForm {
            city_id: Some("1".to_string()),
            max: Some("25.0".to_string()),
            min: Some("10.0".to_string()),
        };
        let temperature = form.into_temperature(1_700_000_000).unwrap();
        assert_eq!(temperature, Temperature::new(1, 25.0, 10.0, 1_700_000_000));
    }

    #[test]
    fn test_temperature_form_rejects_fractional_city_id() {
        let form = TemperatureForm {
            city_id: Some("1.5".to_string()),
            max: Some("25".to_string()),
            min: Some("10".to_string()),
        };
        let err = form.into_temperature(0).unwrap_err();
        assert!(matches!(err, AppError::Parse { field: "city_id", .. }));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(parse_id("").is_err());
        assert!(parse_id("+5").is_err());
        assert!(parse_id("-1").is_err());
        assert!(parse_id("abc").is_err());
        assert!(parse_id("99999999999").is_err());
    }
}
