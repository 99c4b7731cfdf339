//! Observer and sky coordinate types
//!
//! Azimuth is measured in degrees clockwise from North (0 = N, 90 = E,
//! 180 = S, 270 = W) and altitude in degrees above the horizon. Every model in
//! the crate returns positions in this convention.

pub mod angle;
pub mod cartesian;

pub use angle::{wrap_degrees, Angle};
pub use cartesian::{Cartesian2, Cartesian3, CartesianVector, Dimension};

use crate::{check_latitude, check_longitude, Result, SunMoonError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic position of an observer in degrees
///
/// Deserialization goes through [`GeoCoordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoCoordinate")]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Create a validated coordinate
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        check_latitude(latitude)?;
        check_longitude(longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

#[derive(Deserialize)]
struct RawGeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoCoordinate> for GeoCoordinate {
    type Error = SunMoonError;

    fn try_from(raw: RawGeoCoordinate) -> Result<Self> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Direction of a body in the observer's local sky
///
/// Deserialization goes through [`HorizontalPosition::new`], so the azimuth
/// is wrapped and the altitude range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHorizontalPosition")]
pub struct HorizontalPosition {
    /// Degrees clockwise from North, in `[0, 360)`
    pub azimuth_deg: f64,
    /// Degrees above the horizon, in `[-90, 90]`
    pub altitude_deg: f64,
}

impl HorizontalPosition {
    /// Create a position, wrapping the azimuth into `[0, 360)`
    ///
    /// Altitudes outside `[-90, 90]` and non-finite angles are rejected.
    pub fn new(azimuth_deg: f64, altitude_deg: f64) -> Result<Self> {
        if !azimuth_deg.is_finite() || !altitude_deg.is_finite() {
            return Err(SunMoonError::InvalidInput(format!(
                "non-finite horizontal position ({}, {})",
                azimuth_deg, altitude_deg
            )));
        }
        if !(-90.0..=90.0).contains(&altitude_deg) {
            return Err(SunMoonError::InvalidInput(format!(
                "altitude {} outside [-90, 90]",
                altitude_deg
            )));
        }
        Ok(Self {
            azimuth_deg: wrap_degrees(azimuth_deg),
            altitude_deg,
        })
    }

    /// Build from model output, wrapping azimuth and clamping altitude
    ///
    /// Used where the arithmetic is total over valid inputs and only rounding
    /// can push the altitude a hair past the poles.
    pub(crate) fn from_model(azimuth_deg: f64, altitude_deg: f64) -> Self {
        Self {
            azimuth_deg: wrap_degrees(azimuth_deg),
            altitude_deg: altitude_deg.clamp(-90.0, 90.0),
        }
    }

    pub fn azimuth(&self) -> Angle {
        Angle::from_degrees(self.azimuth_deg)
    }

    pub fn altitude(&self) -> Angle {
        Angle::from_degrees(self.altitude_deg)
    }

    /// Whether the body is above the horizon
    pub fn is_above_horizon(&self) -> bool {
        self.altitude_deg > 0.0
    }

    /// Nearest of the eight compass points
    pub fn compass_point(&self) -> &'static str {
        const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
        let sector = ((self.azimuth_deg + 22.5) / 45.0).floor() as usize % POINTS.len();
        POINTS[sector]
    }
}

#[derive(Deserialize)]
struct RawHorizontalPosition {
    azimuth_deg: f64,
    altitude_deg: f64,
}

impl TryFrom<RawHorizontalPosition> for HorizontalPosition {
    type Error = SunMoonError;

    fn try_from(raw: RawHorizontalPosition) -> Result<Self> {
        Self::new(raw.azimuth_deg, raw.altitude_deg)
    }
}

impl fmt::Display for HorizontalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "azimuth {:.2}° ({}), altitude {:.2}°",
            self.azimuth_deg,
            self.compass_point(),
            self.altitude_deg
        )
    }
}
