//! Simplified solar position model
//!
//! The declination follows a single cosine over a 365-day year peaking on
//! day 173. The noon zenith angle is the gap between the observer's latitude
//! and that declination. During the day the azimuth sweeps through the
//! hour-parameterized circle `atan2(sin t · cos ζ, cos t)` and the altitude
//! follows the hour-angle relation, evaluated in haversine form so the noon
//! value `90° − ζ` comes out exact.

use crate::constants::{
    DECLINATION_YEAR_DAYS, DEG2RAD, DEGREES_PER_HOUR, HOURS_PER_DAY, JUNE_SOLSTICE_DAY,
    MAX_SOLAR_DECLINATION_DEG, RAD2DEG, SOLAR_NOON_HOUR, TAU,
};
use crate::coordinates::angle::wrap_period;
use crate::coordinates::HorizontalPosition;
use crate::{check_day_of_year, check_hour, check_latitude, Result};

/// Solar declination in degrees for an ordinal day
///
/// `23.44° · cos(2π/365 · (day − 173))`
pub fn solar_declination(day_of_year: u32) -> Result<f64> {
    check_day_of_year(day_of_year)?;
    Ok(declination_deg(day_of_year))
}

fn declination_deg(day_of_year: u32) -> f64 {
    let phase = TAU / DECLINATION_YEAR_DAYS * (day_of_year as f64 - JUNE_SOLSTICE_DAY);
    MAX_SOLAR_DECLINATION_DEG * phase.cos()
}

/// Zenith angle of the Sun at local solar noon, in degrees
pub fn noon_zenith_angle(day_of_year: u32, latitude: f64) -> Result<f64> {
    check_day_of_year(day_of_year)?;
    check_latitude(latitude)?;
    Ok((latitude - declination_deg(day_of_year)).abs())
}

/// Sun position at local solar noon
///
/// Identical to [`sun_position_at`] evaluated at hour 12; the azimuth is the
/// meridian (180°).
pub fn sun_position(day_of_year: u32, latitude: f64) -> Result<HorizontalPosition> {
    sun_position_at(day_of_year, SOLAR_NOON_HOUR, latitude)
}

/// Sun position at a local decimal hour
///
/// Hours outside `[0, 24)` are wrapped.
pub fn sun_position_at(day_of_year: u32, hour: f64, latitude: f64) -> Result<HorizontalPosition> {
    check_day_of_year(day_of_year)?;
    check_hour(hour)?;
    check_latitude(latitude)?;

    let hour = wrap_period(hour, HOURS_PER_DAY);
    let declination = declination_deg(day_of_year) * DEG2RAD;
    let latitude = latitude * DEG2RAD;
    let zenith = (latitude - declination).abs();

    let t = TAU * hour / HOURS_PER_DAY;
    let azimuth = (t.sin() * zenith.cos()).atan2(t.cos());

    let hour_angle = (hour - SOLAR_NOON_HOUR) * DEGREES_PER_HOUR * DEG2RAD;
    let hav = haversine(latitude - declination)
        + latitude.cos() * declination.cos() * haversine(hour_angle);
    let zenith_now = 2.0 * hav.clamp(0.0, 1.0).sqrt().asin();

    Ok(HorizontalPosition::from_model(
        azimuth * RAD2DEG,
        90.0 - zenith_now * RAD2DEG,
    ))
}

fn haversine(angle: f64) -> f64 {
    let half = (angle / 2.0).sin();
    half * half
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SunMoonError;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[test]
    fn test_declination_peaks_at_solstice() {
        assert_abs_diff_eq!(solar_declination(173).unwrap(), 23.44, epsilon = 1e-12);
        assert!(solar_declination(355).unwrap() < -23.4);
        // Equinox region
        assert!(solar_declination(81).unwrap().abs() < 1.0);
        assert!(solar_declination(264).unwrap().abs() < 1.0);
    }

    #[test]
    fn test_solstice_equator_noon() {
        let pos = sun_position(173, 0.0).unwrap();
        assert_abs_diff_eq!(pos.altitude_deg, 66.56, epsilon = 1e-9);
        assert_abs_diff_eq!(pos.azimuth_deg, 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(noon_zenith_angle(173, 0.0).unwrap(), 23.44, epsilon = 1e-12);
    }

    #[test]
    fn test_overhead_on_tropic() {
        let pos = sun_position(173, 23.44).unwrap();
        assert_abs_diff_eq!(pos.altitude_deg, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_noon_is_hour_twelve() {
        for day in [1, 100, 173, 250, 366] {
            for lat in [-66.0, 0.0, 17.612778, 51.5] {
                let noon = sun_position(day, lat).unwrap();
                let at_twelve = sun_position_at(day, 12.0, lat).unwrap();
                assert_eq!(noon, at_twelve);
            }
        }
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(6.0, 90.0)]
    #[case(12.0, 180.0)]
    #[case(18.0, 270.0)]
    #[case(24.0, 0.0)]
    fn test_azimuth_follows_compass(#[case] hour: f64, #[case] expected: f64) {
        let pos = sun_position_at(173, hour, 40.0).unwrap();
        let diff = (pos.azimuth_deg - expected + 180.0).rem_euclid(360.0) - 180.0;
        assert!(diff.abs() < 1e-9, "hour {} gave azimuth {}", hour, pos.azimuth_deg);
    }

    #[test]
    fn test_noon_is_highest() {
        let noon = sun_position(100, 35.0).unwrap();
        for hour in [0.0, 3.0, 6.0, 9.0, 11.5, 12.5, 15.0, 21.0] {
            let pos = sun_position_at(100, hour, 35.0).unwrap();
            assert!(pos.altitude_deg < noon.altitude_deg);
        }
        let midnight = sun_position_at(100, 0.0, 35.0).unwrap();
        assert!(midnight.altitude_deg < 0.0);
    }

    #[test]
    fn test_polar_day_and_night() {
        let summer_midnight = sun_position_at(173, 0.0, 80.0).unwrap();
        assert!(summer_midnight.is_above_horizon());

        let winter_noon = sun_position(355, 80.0).unwrap();
        assert!(!winter_noon.is_above_horizon());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            sun_position(0, 0.0),
            Err(SunMoonError::InvalidInput(_))
        ));
        assert!(sun_position(367, 0.0).is_err());
        assert!(sun_position(10, 95.0).is_err());
        assert!(sun_position_at(10, f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_repeatable() {
        let a = sun_position_at(200, 7.25, -33.9).unwrap();
        let b = sun_position_at(200, 7.25, -33.9).unwrap();
        assert_eq!(a.azimuth_deg.to_bits(), b.azimuth_deg.to_bits());
        assert_eq!(a.altitude_deg.to_bits(), b.altitude_deg.to_bits());
    }
}
