//! Constants module for the simplified Sun and Moon models

use std::f64::consts::PI;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;
/// Degrees in a complete circle
pub const DEG360: f64 = 360.0;

// Time constants
/// Hours in a day
pub const HOURS_PER_DAY: f64 = 24.0;
/// Degrees of longitude per hour of local time offset
pub const DEGREES_PER_HOUR: f64 = 15.0;
/// Local solar noon in decimal hours
pub const SOLAR_NOON_HOUR: f64 = 12.0;
/// Smallest valid ordinal day of the year
pub const FIRST_DAY_OF_YEAR: u32 = 1;
/// Largest valid ordinal day of the year (leap years)
pub const LAST_DAY_OF_YEAR: u32 = 366;

// Sun model
/// Maximum solar declination (axial tilt) in degrees
pub const MAX_SOLAR_DECLINATION_DEG: f64 = 23.44;
/// Day of year the declination peaks (June solstice approximation)
pub const JUNE_SOLSTICE_DAY: f64 = 173.0;
/// Length of the year used by the declination cosine, in days
pub const DECLINATION_YEAR_DAYS: f64 = 365.0;

// Moon model
/// Sidereal month in days; parameterizes the Moon's orbital position
pub const SIDEREAL_MONTH_DAYS: f64 = 27.3;
/// Synodic month in days; spacing between estimated full moons
pub const SYNODIC_MONTH_DAYS: f64 = 29.5;
/// Illustrative Moon orbit radius in plotting units
pub const MOON_ORBIT_RADIUS: f64 = 0.5;
/// Amplitude of the out-of-plane term of the 3D Moon orbit
pub const MOON_ORBIT_INCLINATION: f64 = 0.1;

// Lunar cycle defaults
/// Approximate ordinal day of the first full moon of a year
pub const DEFAULT_FIRST_FULL_MOON_DAY: u32 = 15;
/// Number of full moons estimated per year
pub const DEFAULT_FULL_MOON_COUNT: usize = 12;

// Plotting distances
/// Default projection distance for the Sun
pub const SUN_PLOT_DISTANCE: f64 = 1.0;
/// Default projection distance for the Moon
pub const MOON_PLOT_DISTANCE: f64 = MOON_ORBIT_RADIUS;
