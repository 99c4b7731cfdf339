//! Azimuth/altitude to Cartesian projection
//!
//! The one place sky directions become plotting vectors:
//!
//! - `x = d · cos(alt) · sin(az)` (East)
//! - `y = d · cos(alt) · cos(az)` (North)
//! - `z = d · sin(alt)` (Zenith, 3D only)
//!
//! The inverse functions exist for cross-checking projected output.

use crate::coordinates::{
    wrap_degrees, Cartesian2, Cartesian3, CartesianVector, Dimension, HorizontalPosition,
};
use crate::{Result, SunMoonError};

/// Horizontal lengths below this leave the azimuth undefined
const MIN_HORIZONTAL_LENGTH: f64 = 1e-12;

/// Project a sky position to a Cartesian vector at the given distance
///
/// `distance` must be finite and positive.
pub fn project(
    position: &HorizontalPosition,
    distance: f64,
    dimension: Dimension,
) -> Result<CartesianVector> {
    if !distance.is_finite() || distance <= 0.0 {
        return Err(SunMoonError::InvalidInput(format!(
            "projection distance {} must be finite and positive",
            distance
        )));
    }

    let azimuth = position.azimuth().to_radians();
    let altitude = position.altitude().to_radians();
    let horizontal = distance * altitude.cos();
    let x = horizontal * azimuth.sin();
    let y = horizontal * azimuth.cos();

    Ok(match dimension {
        Dimension::Two => Cartesian2::new(x, y).into(),
        Dimension::Three => Cartesian3::new(x, y, distance * altitude.sin()).into(),
    })
}

/// Project onto the unit sphere
pub fn project_unit(
    position: &HorizontalPosition,
    dimension: Dimension,
) -> Result<CartesianVector> {
    project(position, 1.0, dimension)
}

fn azimuth_of(x: f64, y: f64) -> Result<f64> {
    if x.hypot(y) < MIN_HORIZONTAL_LENGTH {
        return Err(SunMoonError::InvalidInput(
            "azimuth is undefined for a vertical or zero vector".to_string(),
        ));
    }
    Ok(wrap_degrees(x.atan2(y).to_degrees()))
}

/// Recover the sky position from a 3D vector
///
/// Planar vectors carry no altitude sign; use [`unproject_planar`] for them.
pub fn unproject(vector: &CartesianVector) -> Result<HorizontalPosition> {
    match vector {
        CartesianVector::Spatial(v) => {
            let azimuth = azimuth_of(v.x, v.y)?;
            let ratio = (v.z / v.magnitude()).clamp(-1.0, 1.0);
            HorizontalPosition::new(azimuth, ratio.asin().to_degrees())
        }
        CartesianVector::Planar(_) => Err(SunMoonError::InvalidInput(
            "planar vector needs its projection distance; use unproject_planar".to_string(),
        )),
    }
}

/// Recover azimuth and unsigned altitude from a planar vector
///
/// The altitude is `acos(|v| / distance)`; a body below the horizon comes back
/// with the mirrored positive altitude.
pub fn unproject_planar(vector: &Cartesian2, distance: f64) -> Result<HorizontalPosition> {
    if !distance.is_finite() || distance <= 0.0 {
        return Err(SunMoonError::InvalidInput(format!(
            "projection distance {} must be finite and positive",
            distance
        )));
    }
    let azimuth = azimuth_of(vector.x, vector.y)?;
    let ratio = (vector.magnitude() / distance).clamp(0.0, 1.0);
    HorizontalPosition::new(azimuth, ratio.acos().to_degrees())
}
