//! Sampled trajectories for plotting
//!
//! A plot of the sky over a year or a day is a list of model positions run
//! through the projector. These helpers produce those lists so the plotting
//! layer only draws them.

use crate::almanac::{FullMoonEvent, FullMoonSchedule};
use crate::celestial::{CelestialBody, CelestialObject};
use crate::constants::{DECLINATION_YEAR_DAYS, HOURS_PER_DAY};
use crate::coordinates::{CartesianVector, Dimension, GeoCoordinate, HorizontalPosition};
use crate::projection::project;
use crate::time::TimePoint;
use crate::{check_hour, Result, SunMoonError};
use serde::{Deserialize, Serialize};

/// Finest daily sampling step, one second
const MIN_STEP_HOURS: f64 = 1.0 / 3600.0;

/// One sampled position of a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathSample {
    pub body: CelestialBody,
    pub day_of_year: u32,
    pub hour: f64,
    pub position: HorizontalPosition,
    pub vector: CartesianVector,
}

/// Hourly Moon orbit of one estimated full moon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullMoonPath {
    pub event: FullMoonEvent,
    pub orbit: Vec<CartesianVector>,
}

fn sample(
    body: CelestialBody,
    time: TimePoint,
    observer: &GeoCoordinate,
    distance: f64,
    dimension: Dimension,
) -> Result<PathSample> {
    let position = body.horizontal_position(&time, observer)?;
    Ok(PathSample {
        body,
        day_of_year: time.day_of_year,
        hour: time.decimal_hour,
        position,
        vector: project(&position, distance, dimension)?,
    })
}

/// One sample per day of a 365-day year at a fixed local hour
pub fn yearly_path(
    body: CelestialBody,
    observer: &GeoCoordinate,
    hour: f64,
    distance: f64,
    dimension: Dimension,
) -> Result<Vec<PathSample>> {
    check_hour(hour)?;
    (1..=DECLINATION_YEAR_DAYS as u32)
        .map(|day| sample(body, TimePoint::new(day, hour)?, observer, distance, dimension))
        .collect()
}

/// Samples every `step_hours` across one day, starting at midnight
///
/// The step must lie between one second and 24 hours.
pub fn daily_path(
    body: CelestialBody,
    day_of_year: u32,
    observer: &GeoCoordinate,
    step_hours: f64,
    distance: f64,
    dimension: Dimension,
) -> Result<Vec<PathSample>> {
    if !(MIN_STEP_HOURS..=HOURS_PER_DAY).contains(&step_hours) {
        return Err(SunMoonError::InvalidInput(format!(
            "step of {} hours outside [1 s, 24 h]",
            step_hours
        )));
    }

    let steps = (HOURS_PER_DAY / step_hours).ceil() as usize;
    (0..steps)
        .map(|i| i as f64 * step_hours)
        .filter(|hour| *hour < HOURS_PER_DAY)
        .map(|hour| {
            sample(
                body,
                TimePoint::new(day_of_year, hour)?,
                observer,
                distance,
                dimension,
            )
        })
        .collect()
}

/// Hourly Moon orbits for every event of a schedule
pub fn full_moon_paths(
    schedule: &FullMoonSchedule,
    dimension: Dimension,
) -> Result<Vec<FullMoonPath>> {
    schedule
        .iter()
        .map(|event| {
            Ok(FullMoonPath {
                event,
                orbit: event.moon_path(dimension)?,
            })
        })
        .collect()
}
