//! Sunmoon: simplified Sun and Moon positions for an observer on Earth
//!
//! This crate turns an observer location and a point in time into the Sun's
//! and Moon's direction in the local sky (azimuth/altitude), projects those
//! directions into 2D or 3D Cartesian vectors for plotting, and estimates the
//! full-moon days of a year.
//!
//! The models are closed-form approximations, not an ephemeris. Every angle
//! in the public API uses one convention: azimuth in degrees clockwise from
//! North in `[0, 360)`, altitude in degrees in `[-90, 90]`.
//!
//! ```rust
//! use sunmoon::{project, sun_position, Dimension};
//!
//! let noon = sun_position(173, 0.0).unwrap();
//! assert!((noon.altitude_deg - 66.56).abs() < 1e-9);
//!
//! let v = project(&noon, 1.0, Dimension::Three).unwrap();
//! assert!(v.z().unwrap() > 0.0);
//! ```

use thiserror::Error;

pub mod almanac;
pub mod celestial;
pub mod config;
pub mod constants;
pub mod coordinates;
pub mod geocoding;
pub mod moonlib;
pub mod paths;
pub mod projection;
pub mod sunlib;
pub mod time;

// Re-export commonly used types
pub use almanac::{full_moon_days, locate_event, FullMoonEvent, FullMoonSchedule, MatchTolerance};
pub use celestial::{CelestialBody, CelestialObject};
pub use coordinates::{CartesianVector, Dimension, GeoCoordinate, HorizontalPosition};
pub use moonlib::{moon_orbit_point, moon_position};
pub use projection::{project, project_unit, unproject, unproject_planar};
pub use sunlib::{solar_declination, sun_position, sun_position_at};
pub use time::{day_of_year, local_hour, TimePoint};

/// Main error type for the sunmoon library
#[derive(Debug, Error)]
pub enum SunMoonError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for sunmoon operations
pub type Result<T> = std::result::Result<T, SunMoonError>;

/// Checks that a latitude in degrees is finite and within `[-90, 90]`
pub(crate) fn check_latitude(latitude: f64) -> Result<()> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(SunMoonError::InvalidInput(format!(
            "latitude {} outside [-90, 90]",
            latitude
        )));
    }
    Ok(())
}

/// Checks that a longitude in degrees is finite and within `[-180, 180]`
pub(crate) fn check_longitude(longitude: f64) -> Result<()> {
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(SunMoonError::InvalidInput(format!(
            "longitude {} outside [-180, 180]",
            longitude
        )));
    }
    Ok(())
}

/// Checks that an ordinal day lies within `[1, 366]`
pub(crate) fn check_day_of_year(day_of_year: u32) -> Result<()> {
    use crate::constants::{FIRST_DAY_OF_YEAR, LAST_DAY_OF_YEAR};

    if !(FIRST_DAY_OF_YEAR..=LAST_DAY_OF_YEAR).contains(&day_of_year) {
        return Err(SunMoonError::InvalidInput(format!(
            "day of year {} outside [{}, {}]",
            day_of_year, FIRST_DAY_OF_YEAR, LAST_DAY_OF_YEAR
        )));
    }
    Ok(())
}

/// Checks that a decimal hour is a finite number
pub(crate) fn check_hour(hour: f64) -> Result<()> {
    if !hour.is_finite() {
        return Err(SunMoonError::InvalidInput(format!(
            "hour {} is not finite",
            hour
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_checks() {
        assert!(check_latitude(90.0).is_ok());
        assert!(check_latitude(-90.0).is_ok());
        assert!(check_latitude(90.5).is_err());
        assert!(check_latitude(f64::NAN).is_err());

        assert!(check_longitude(-180.0).is_ok());
        assert!(check_longitude(181.0).is_err());

        assert!(check_day_of_year(1).is_ok());
        assert!(check_day_of_year(366).is_ok());
        assert!(check_day_of_year(0).is_err());
        assert!(check_day_of_year(367).is_err());

        assert!(check_hour(23.99).is_ok());
        assert!(check_hour(f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = check_latitude(123.0).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: latitude 123 outside [-90, 90]");

        let err = SunMoonError::NotFound("full moon near day 320".to_string());
        assert_eq!(err.to_string(), "Not found: full moon near day 320");
    }
}
