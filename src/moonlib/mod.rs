//! Simplified lunar position model
//!
//! The Moon runs around an illustrative circular orbit of radius 0.5 with the
//! sidereal period of 27.3 days. Its azimuth is the orbit phase read as a
//! compass bearing. Its altitude is fixed by the orbit radius,
//! `90° − atan(r)`, so the model does not depend on the observer's latitude.
//! Full-moon recurrence uses the separate synodic constant in
//! [`crate::almanac`].

use crate::constants::{
    HOURS_PER_DAY, MOON_ORBIT_INCLINATION, MOON_ORBIT_RADIUS, RAD2DEG, SIDEREAL_MONTH_DAYS, TAU,
};
use crate::coordinates::{Cartesian2, Cartesian3, CartesianVector, Dimension, HorizontalPosition};
use crate::{check_day_of_year, check_hour, check_latitude, Result};

/// Orbit phase in radians for a continuous day count `day + hour / 24`
pub fn orbit_phase(fractional_day: f64) -> f64 {
    TAU * fractional_day / SIDEREAL_MONTH_DAYS
}

fn phase_for(day_of_year: u32, hour: f64) -> Result<f64> {
    check_day_of_year(day_of_year)?;
    check_hour(hour)?;
    Ok(orbit_phase(day_of_year as f64 + hour / HOURS_PER_DAY))
}

/// Point on the Moon's illustrative orbit in plotting units
///
/// The 3D variant adds a small out-of-plane term `0.1 · sin t`. Hours outside
/// `[0, 24)` carry into the neighbouring days.
pub fn moon_orbit_point(
    day_of_year: u32,
    hour: f64,
    dimension: Dimension,
) -> Result<CartesianVector> {
    let t = phase_for(day_of_year, hour)?;
    let x = MOON_ORBIT_RADIUS * t.cos();
    let y = MOON_ORBIT_RADIUS * t.sin();

    Ok(match dimension {
        Dimension::Two => Cartesian2::new(x, y).into(),
        Dimension::Three => Cartesian3::new(x, y, MOON_ORBIT_INCLINATION * t.sin()).into(),
    })
}

/// Moon position for an ordinal day and local decimal hour
///
/// `latitude` is validated for symmetry with the Sun model but does not
/// affect the result. Hours outside `[0, 24)` carry into the neighbouring
/// days, so the position is periodic in `day + hour / 24` with period 27.3.
pub fn moon_position(day_of_year: u32, hour: f64, latitude: f64) -> Result<HorizontalPosition> {
    check_latitude(latitude)?;
    let t = phase_for(day_of_year, hour)?;
    let x = MOON_ORBIT_RADIUS * t.cos();
    let y = MOON_ORBIT_RADIUS * t.sin();

    let azimuth = y.atan2(x) * RAD2DEG;
    let altitude = 90.0 - x.hypot(y).atan() * RAD2DEG;
    Ok(HorizontalPosition::from_model(azimuth, altitude))
}
