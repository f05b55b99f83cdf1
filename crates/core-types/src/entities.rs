use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Largest accepted absolute latitude, in degrees.
pub const MAX_ABS_LATITUDE: f64 = 90.0;
/// Largest accepted absolute longitude, in degrees.
pub const MAX_ABS_LONGITUDE: f64 = 180.0;
/// Lower temperature bound in degrees Celsius (roughly absolute zero).
pub const MIN_TEMPERATURE_C: f32 = -273.0;
/// Upper temperature bound in degrees Celsius.
pub const MAX_TEMPERATURE_C: f32 = 100.0;

/// A city as stored in the `cities` table.
///
/// `id` is assigned by the database on insert; before that it is `0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow)]
pub struct City {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

impl City {
    /// Creates a city that has not been persisted yet.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Checks the city before it is written. The first failing rule is reported.
    ///
    /// Bounds are inclusive: a latitude of exactly `90.0` is accepted, while
    /// `90.0000001` is not. NaN coordinates are rejected. The name is not
    /// trimmed, so `" "` counts as a name.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !(self.latitude.abs() <= MAX_ABS_LATITUDE) {
            return Err(ValidationError::LatitudeOutOfRange(self.latitude));
        }
        if !(self.longitude.abs() <= MAX_ABS_LONGITUDE) {
            return Err(ValidationError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }
}

/// A single temperature measurement for a city, as stored in `temperatures`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow)]
pub struct Temperature {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "CityID")]
    pub city_id: i32,
    #[serde(rename = "MaxC")]
    #[sqlx(rename = "max_cels")]
    pub max_c: f32,
    #[serde(rename = "MinC")]
    #[sqlx(rename = "min_cels")]
    pub min_c: f32,
    /// Seconds since the Unix epoch, set by the server when the measurement arrives.
    #[serde(rename = "Timestamp")]
    #[sqlx(rename = "time_unix")]
    pub timestamp: i64,
}

impl Temperature {
    /// Creates a measurement that has not been persisted yet.
    pub fn new(city_id: i32, max_c: f32, min_c: f32, timestamp: i64) -> Self {
        Self {
            id: 0,
            city_id,
            max_c,
            min_c,
            timestamp,
        }
    }

    /// Checks the measurement before it is written. The first failing rule is reported.
    ///
    /// `min_c <= max_c` is intentionally not enforced.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.city_id <= 0 {
            return Err(ValidationError::InvalidCityId(self.city_id));
        }
        if !in_temperature_range(self.min_c) {
            return Err(ValidationError::MinTemperatureOutOfRange(self.min_c));
        }
        if !in_temperature_range(self.max_c) {
            return Err(ValidationError::MaxTemperatureOutOfRange(self.max_c));
        }
        Ok(())
    }
}

fn in_temperature_range(value: f32) -> bool {
    (MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_city_accepts_valid_values() {
        let city = City::new("Moscow", 55.751, 37.618);
        assert_eq!(city.validate(), Ok(()));
    }

    #[test]
    fn test_city_bounds_are_inclusive() {
        assert!(City::new("North Pole", 90.0, 180.0).validate().is_ok());
        assert!(City::new("South Pole", -90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn test_city_rejects_empty_name() {
        let err = City::new("", 0.0, 0.0).validate().unwrap_err();
        assert_eq!(err, ValidationError::EmptyName);
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn test_city_rejects_marginal_latitude() {
        let err = City::new("Nowhere", 90.0000001, 0.0).validate().unwrap_err();
        assert_eq!(err, ValidationError::LatitudeOutOfRange(90.0000001));
        assert!(City::new("Nowhere", -91.0, 0.0).validate().is_err());
    }

    #[test]
    fn test_city_rejects_marginal_longitude() {
        let err = City::new("Nowhere", 0.0, -180.0001).validate().unwrap_err();
        assert_eq!(err.field(), "longitude");
    }

    #[test]
    fn test_city_rejects_nan() {
        assert!(City::new("Nowhere", f64::NAN, 0.0).validate().is_err());
        assert!(City::new("Nowhere", 0.0, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_city_first_failing_rule_wins() {
        let err = City::new("", 100.0, 200.0).validate().unwrap_err();
        assert_eq!(err, ValidationError::EmptyName);
    }

    #[test]
    fn test_validation_does_not_mutate() {
        let city = City::new("Berlin", 52.52, 13.41);
        let before = city.clone();
        let _ = city.validate();
        assert_eq!(city, before);
    }

    #[test]
    fn test_temperature_accepts_valid_values() {
        assert!(Temperature::new(1, 25.0, 10.0, 1_700_000_000).validate().is_ok());
        assert!(Temperature::new(1, 100.0, -273.0, 0).validate().is_ok());
    }

    #[test]
    fn test_temperature_allows_min_above_max() {
        assert!(Temperature::new(1, 10.0, 25.0, 0).validate().is_ok());
    }

    #[test]
    fn test_temperature_rejects_out_of_range() {
        let err = Temperature::new(1, 100.5, 0.0, 0).validate().unwrap_err();
        assert_eq!(err, ValidationError::MaxTemperatureOutOfRange(100.5));
        let err = Temperature::new(1, 0.0, -273.5, 0).validate().unwrap_err();
        assert_eq!(err.field(), "min");
    }

    #[test]
    fn test_city_json_field_names() {
        let city = City {
            id: 7,
            ..City::new("Moscow", 55.751, 37.618)
        };
        let json = serde_json::to_value(&city).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"ID": 7, "Name": "Moscow", "Latitude": 55.751, "Longitude": 37.618})
        );
    }

    #[test]
    fn test_temperature_json_field_names() {
        let json = serde_json::to_value(Temperature::new(3, 25.0, 10.0, 42)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"ID": 0, "CityID": 3, "MaxC": 25.0, "MinC": 10.0, "Timestamp": 42})
        );
    }

    proptest! {
        #[test]
        fn prop_city_in_bounds_is_valid(
            name in "[a-zA-Z ]{1,32}",
            lat in -90.0f64..=90.0,
            lon in -180.0f64..=180.0,
        ) {
            prop_assert!(City::new(name, lat, lon).validate().is_ok());
        }

        #[test]
        fn prop_latitude_beyond_ninety_is_invalid(excess in 1e-6f64..1e6, negative in any::<bool>()) {
            let lat = if negative { -(90.0 + excess) } else { 90.0 + excess };
            prop_assert_eq!(
                City::new("X", lat, 0.0).validate(),
                Err(ValidationError::LatitudeOutOfRange(lat))
            );
        }

        #[test]
        fn prop_longitude_beyond_one_eighty_is_invalid(excess in 1e-6f64..1e6, negative in any::<bool>()) {
            let lon = if negative { -(180.0 + excess) } else { 180.0 + excess };
            prop_assert_eq!(
                City::new("X", 0.0, lon).validate(),
                Err(ValidationError::LongitudeOutOfRange(lon))
            );
        }

        #[test]
        fn prop_non_positive_city_id_is_invalid(
            city_id in i32::MIN..=0,
            max in proptest::num::f32::ANY,
            min in proptest::num::f32::ANY,
        ) {
            prop_assert_eq!(
                Temperature::new(city_id, max, min, 0).validate(),
                Err(ValidationError::InvalidCityId(city_id))
            );
        }

        #[test]
        fn prop_temperature_outside_range_is_invalid(
            city_id in 1i32..=i32::MAX,
            out in prop_oneof![-1e6f32..-273.01, 100.01f32..1e6],
            inside in -273.0f32..=100.0,
            out_is_max in any::<bool>(),
        ) {
            let (max, min) = if out_is_max { (out, inside) } else { (inside, out) };
            prop_assert!(Temperature::new(city_id, max, min, 0).validate().is_err());
        }
    }
}
