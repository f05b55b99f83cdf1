use thiserror::Error;

/// The reason an entity was rejected before persistence.
///
/// Each variant carries the offending value so logs can show exactly what
/// the client sent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("City: name is empty")]
    EmptyName,

    #[error("Latitude: wrong value {0} (allowed -90..90)")]
    LatitudeOutOfRange(f64),

    #[error("Longitude: wrong value {0} (allowed -180..180)")]
    LongitudeOutOfRange(f64),

    #[error("Temperature: city_id must be positive, got {0}")]
    InvalidCityId(i32),

    #[error("Temperature: min {0} is outside -273..100")]
    MinTemperatureOutOfRange(f32),

    #[error("Temperature: max {0} is outside -273..100")]
    MaxTemperatureOutOfRange(f32),
}

impl ValidationError {
    /// The name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyName => "name",
            ValidationError::LatitudeOutOfRange(_) => "latitude",
            ValidationError::LongitudeOutOfRange(_) => "longitude",
            ValidationError::InvalidCityId(_) => "city_id",
            ValidationError::MinTemperatureOutOfRange(_) => "min",
            ValidationError::MaxTemperatureOutOfRange(_) => "max",
        }
    }
}
