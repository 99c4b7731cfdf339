//! # Cartesian Coordinate Module
//!
//! Plotting-space vectors for the observer's local sky. The frame is the
//! observer's horizon:
//! - **X-axis**: East
//! - **Y-axis**: North
//! - **Z-axis**: Zenith
//!
//! Vectors are never built from raw angles here; the projector in
//! [`crate::projection`] is the only place azimuth/altitude become x/y/z.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Output dimensionality of a projected vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Horizon-plane vector `{x, y}`
    Two,
    /// Full sky vector `{x, y, z}`
    Three,
}

impl Dimension {
    /// Parses the `2` / `3` spelling used on the command line
    pub fn from_count(count: u8) -> Option<Self> {
        match count {
            2 => Some(Dimension::Two),
            3 => Some(Dimension::Three),
            _ => None,
        }
    }
}

/// Two-dimensional horizon-plane vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cartesian2 {
    /// East component
    pub x: f64,
    /// North component
    pub y: f64,
}

impl Cartesian2 {
    pub fn new(x: f64, y: f64) -> Self {
        Cartesian2 { x, y }
    }

    /// Length of the vector
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Three-dimensional horizon-frame vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cartesian3 {
    /// East component
    pub x: f64,
    /// North component
    pub y: f64,
    /// Zenith component
    pub z: f64,
}

impl Cartesian3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Cartesian3 { x, y, z }
    }

    /// Length of the vector
    pub fn magnitude(&self) -> f64 {
        self.to_vector3().norm()
    }

    /// Drops the zenith component
    pub fn to_planar(&self) -> Cartesian2 {
        Cartesian2::new(self.x, self.y)
    }

    /// Converts to a nalgebra Vector3
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from a nalgebra Vector3
    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Cartesian3::new(vec.x, vec.y, vec.z)
    }
}

/// A projected position handed to the plotting layer
///
/// Serializes as a plain `{"x": .., "y": ..}` or `{"x": .., "y": .., "z": ..}`
/// object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CartesianVector {
    Spatial(Cartesian3),
    Planar(Cartesian2),
}

impl CartesianVector {
    /// East component
    pub fn x(&self) -> f64 {
        match self {
            CartesianVector::Planar(v) => v.x,
            CartesianVector::Spatial(v) => v.x,
        }
    }

    /// North component
    pub fn y(&self) -> f64 {
        match self {
            CartesianVector::Planar(v) => v.y,
            CartesianVector::Spatial(v) => v.y,
        }
    }

    /// Zenith component, absent for planar vectors
    pub fn z(&self) -> Option<f64> {
        match self {
            CartesianVector::Planar(_) => None,
            CartesianVector::Spatial(v) => Some(v.z),
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            CartesianVector::Planar(_) => Dimension::Two,
            CartesianVector::Spatial(_) => Dimension::Three,
        }
    }

    /// Length of the vector
    pub fn magnitude(&self) -> f64 {
        match self {
            CartesianVector::Planar(v) => v.magnitude(),
            CartesianVector::Spatial(v) => v.magnitude(),
        }
    }
}

impl From<Cartesian2> for CartesianVector {
    fn from(v: Cartesian2) -> Self {
        CartesianVector::Planar(v)
    }
}

impl From<Cartesian3> for CartesianVector {
    fn from(v: Cartesian3) -> Self {
        CartesianVector::Spatial(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_magnitude() {
        assert_relative_eq!(Cartesian2::new(3.0, 4.0).magnitude(), 5.0);
        assert_relative_eq!(Cartesian3::new(2.0, 3.0, 6.0).magnitude(), 7.0);
    }

    #[test]
    fn test_vector_accessors() {
        let planar: CartesianVector = Cartesian2::new(1.0, 2.0).into();
        assert_eq!(planar.x(), 1.0);
        assert_eq!(planar.y(), 2.0);
        assert_eq!(planar.z(), None);
        assert_eq!(planar.dimension(), Dimension::Two);

        let spatial: CartesianVector = Cartesian3::new(1.0, 2.0, 3.0).into();
        assert_eq!(spatial.z(), Some(3.0));
        assert_eq!(spatial.dimension(), Dimension::Three);
    }

    #[test]
    fn test_vector3_round_trip() {
        let c = Cartesian3::new(0.25, -0.5, 0.75);
        assert_eq!(Cartesian3::from_vector3(c.to_vector3()), c);
        assert_eq!(c.to_planar(), Cartesian2::new(0.25, -0.5));
    }

    #[test]
    fn test_dimension_from_count() {
        assert_eq!(Dimension::from_count(2), Some(Dimension::Two));
        assert_eq!(Dimension::from_count(3), Some(Dimension::Three));
        assert_eq!(Dimension::from_count(4), None);
    }

    #[test]
    fn test_untagged_serialization() {
        let planar: CartesianVector = Cartesian2::new(1.0, 0.5).into();
        let json = serde_json::to_string(&planar).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":0.5}"#);

        let back: CartesianVector = serde_json::from_str(r#"{"x":1.0,"y":0.5,"z":0.25}"#).unwrap();
        assert_eq!(back, CartesianVector::Spatial(Cartesian3::new(1.0, 0.5, 0.25)));

        let back: CartesianVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, planar);
    }
}
