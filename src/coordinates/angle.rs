//! # Angle Representation Module
//!
//! Angles enter the models in degrees (latitudes, declinations, azimuths) and
//! leave the trigonometry in radians. The `Angle` type keeps the value in the
//! unit it was created with and converts only on request, so a degree value
//! handed in by a caller is returned untouched.
//!
//! ```rust
//! use sunmoon::coordinates::angle::{wrap_degrees, Angle};
//!
//! let east = Angle::from_degrees(90.0);
//! assert_eq!(east.to_degrees(), 90.0);
//!
//! assert_eq!(wrap_degrees(-90.0), 270.0);
//! assert_eq!(Angle::from_degrees(450.0).wrapped().to_degrees(), 90.0);
//! ```

use crate::constants::{DEG2RAD, DEG360, RAD2DEG};

/// Unit an [`Angle`] value is stored in
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngleFormat {
    /// Angle stored in degrees
    Degrees(f64),
    /// Angle stored in radians
    Radians(f64),
}

/// An angular measurement that remembers its original unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    angle: AngleFormat,
}

impl Angle {
    /// Creates an angle from a value in degrees
    pub fn from_degrees(degrees: f64) -> Self {
        Angle {
            angle: AngleFormat::Degrees(degrees),
        }
    }

    /// Creates an angle from a value in radians
    pub fn from_radians(radians: f64) -> Self {
        Angle {
            angle: AngleFormat::Radians(radians),
        }
    }

    /// Returns the angle value in degrees
    ///
    /// Exact when the angle was created from degrees.
    pub fn to_degrees(&self) -> f64 {
        match self.angle {
            AngleFormat::Degrees(deg) => deg,
            AngleFormat::Radians(rad) => rad * RAD2DEG,
        }
    }

    /// Returns the angle value in radians
    ///
    /// Exact when the angle was created from radians.
    pub fn to_radians(&self) -> f64 {
        match self.angle {
            AngleFormat::Degrees(deg) => deg * DEG2RAD,
            AngleFormat::Radians(rad) => rad,
        }
    }

    /// Returns the internal format of this angle
    pub fn format(&self) -> AngleFormat {
        self.angle
    }

    /// Returns the same direction as a compass bearing in `[0, 360)` degrees
    pub fn wrapped(&self) -> Angle {
        Angle::from_degrees(wrap_degrees(self.to_degrees()))
    }
}

/// Wraps a value in degrees into `[0, 360)`
///
/// `rem_euclid` rounds tiny negative inputs up to exactly 360.0; those are
/// folded back to 0.0 so the upper bound stays open.
pub fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(DEG360);
    if wrapped >= DEG360 {
        0.0
    } else {
        wrapped
    }
}

/// Wraps a value into `[0, period)` for any positive period
pub(crate) fn wrap_period(value: f64, period: f64) -> f64 {
    let wrapped = value.rem_euclid(period);
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;
    use std::f64::consts::PI;

    #[test]
    fn test_exact_storage() {
        let angle = Angle::from_degrees(123.456789012345);
        assert_eq!(angle.to_degrees(), 123.456789012345);
        match angle.format() {
            AngleFormat::Degrees(val) => assert_eq!(val, 123.456789012345),
            AngleFormat::Radians(_) => panic!("Expected degrees format"),
        }

        let angle = Angle::from_radians(PI / 4.0);
        assert_eq!(angle.to_radians(), PI / 4.0);
        assert_abs_diff_eq!(angle.to_degrees(), 45.0, epsilon = 1e-13);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(360.0, 0.0)]
    #[case(-90.0, 270.0)]
    #[case(725.0, 5.0)]
    #[case(-720.0, 0.0)]
    #[case(359.5, 359.5)]
    fn test_wrap_degrees(#[case] input: f64, #[case] expected: f64) {
        assert_abs_diff_eq!(wrap_degrees(input), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_wrap_never_returns_full_circle() {
        let wrapped = wrap_degrees(-1e-17);
        assert!(wrapped < 360.0);
        assert!(wrapped >= 0.0);

        let wrapped = wrap_period(-1e-17, 24.0);
        assert!(wrapped < 24.0);
    }

    #[test]
    fn test_wrapped_angle_from_radians() {
        let angle = Angle::from_radians(-PI / 2.0).wrapped();
        assert_abs_diff_eq!(angle.to_degrees(), 270.0, epsilon = 1e-12);
    }
}
