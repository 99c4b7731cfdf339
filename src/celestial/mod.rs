//! Celestial body definitions and model dispatch

use crate::constants::{MOON_PLOT_DISTANCE, SUN_PLOT_DISTANCE};
use crate::coordinates::{CartesianVector, Dimension, GeoCoordinate, HorizontalPosition};
use crate::moonlib::moon_position;
use crate::projection::project;
use crate::sunlib::sun_position_at;
use crate::time::TimePoint;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A trait for objects that have a position in the observer's sky
pub trait CelestialObject {
    /// Get the direction of the object at a specific time and place
    fn horizontal_position(
        &self,
        time: &TimePoint,
        observer: &GeoCoordinate,
    ) -> Result<HorizontalPosition>;

    /// Distance used when projecting this object for plotting
    fn plot_distance(&self) -> f64 {
        1.0
    }

    /// Position projected through [`project`] at [`Self::plot_distance`]
    fn sky_vector(
        &self,
        time: &TimePoint,
        observer: &GeoCoordinate,
        dimension: Dimension,
    ) -> Result<CartesianVector> {
        let position = self.horizontal_position(time, observer)?;
        project(&position, self.plot_distance(), dimension)
    }
}

/// The bodies the engine models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CelestialBody {
    Sun,
    Moon,
}

impl CelestialBody {
    /// Get the body's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            CelestialBody::Sun => "Sun",
            CelestialBody::Moon => "Moon",
        }
    }

    /// Both modelled bodies, Sun first
    pub fn all() -> [CelestialBody; 2] {
        [CelestialBody::Sun, CelestialBody::Moon]
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl CelestialObject for CelestialBody {
    fn horizontal_position(
        &self,
        time: &TimePoint,
        observer: &GeoCoordinate,
    ) -> Result<HorizontalPosition> {
        match self {
            CelestialBody::Sun => {
                sun_position_at(time.day_of_year, time.decimal_hour, observer.latitude)
            }
            CelestialBody::Moon => {
                moon_position(time.day_of_year, time.decimal_hour, observer.latitude)
            }
        }
    }

    fn plot_distance(&self) -> f64 {
        match self {
            CelestialBody::Sun => SUN_PLOT_DISTANCE,
            CelestialBody::Moon => MOON_PLOT_DISTANCE,
        }
    }
}
