//! Time module for local-hour and day-of-year normalization
//!
//! Every model in the crate consumes a [`TimePoint`]: a 1-based ordinal day and
//! a local decimal hour. This module builds those from calendar dates and UTC
//! instants. Local time is mean solar time from longitude alone (15° per hour);
//! political time zones are ignored. The crate never reads the wall clock, so
//! callers pass in the instant they care about.

use crate::constants::{DEGREES_PER_HOUR, HOURS_PER_DAY, SOLAR_NOON_HOUR};
use crate::coordinates::angle::wrap_period;
use crate::coordinates::GeoCoordinate;
use crate::{check_day_of_year, check_hour, check_longitude, Result, SunMoonError};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const NANOS_PER_HOUR: f64 = 3_600_000_000_000.0;

/// A normalized point in time: ordinal day and local decimal hour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    /// 1-based day of the year, in `[1, 366]`
    pub day_of_year: u32,
    /// Local decimal hour, in `[0, 24)`
    pub decimal_hour: f64,
}

impl TimePoint {
    /// Create a time point, wrapping the hour modulo 24
    pub fn new(day_of_year: u32, decimal_hour: f64) -> Result<Self> {
        check_day_of_year(day_of_year)?;
        check_hour(decimal_hour)?;
        Ok(Self {
            day_of_year,
            decimal_hour: wrap_period(decimal_hour, HOURS_PER_DAY),
        })
    }

    /// Local solar noon on the given day
    pub fn noon(day_of_year: u32) -> Result<Self> {
        Self::new(day_of_year, SOLAR_NOON_HOUR)
    }

    /// Local time point for an observer at the given UTC instant
    ///
    /// Day and hour both come from the longitude-shifted instant, so an
    /// observer far east of Greenwich may already be on the next day.
    pub fn from_utc(instant: &DateTime<Utc>, observer: &GeoCoordinate) -> Result<Self> {
        check_longitude(observer.longitude)?;
        let offset_ns = (observer.longitude * NANOS_PER_HOUR / DEGREES_PER_HOUR).round() as i64;
        let local = instant
            .checked_add_signed(Duration::nanoseconds(offset_ns))
            .ok_or_else(|| SunMoonError::InvalidInput(format!("{} is out of range", instant)))?;
        Self::new(day_of_year(local.date_naive()), decimal_hour(&local))
    }

    /// Continuous day count `day + hour / 24` used by the Moon model
    pub fn fractional_day(&self) -> f64 {
        self.day_of_year as f64 + self.decimal_hour / HOURS_PER_DAY
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} at {:.2}h", self.day_of_year, self.decimal_hour)
    }
}

/// Local decimal hour from a longitude and a UTC decimal hour
///
/// The offset is `longitude / 15` hours; the result is wrapped into `[0, 24)`.
pub fn local_hour(longitude: f64, utc_hour: f64) -> Result<f64> {
    check_longitude(longitude)?;
    check_hour(utc_hour)?;
    let utc_offset = longitude / DEGREES_PER_HOUR;
    Ok(wrap_period(utc_hour + utc_offset, HOURS_PER_DAY))
}

/// Decimal hour of a UTC instant (hour + minute/60 + second/3600)
pub fn decimal_hour(instant: &DateTime<Utc>) -> f64 {
    let seconds = instant.second() as f64 + instant.nanosecond() as f64 * 1e-9;
    instant.hour() as f64 + instant.minute() as f64 / 60.0 + seconds / 3600.0
}

/// 1-based ordinal day of a date within its calendar year
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Whole days from `start` to `end` (negative when `end` is earlier)
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days()
}

/// January 1 of the given year
pub fn year_start(year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| SunMoonError::InvalidInput(format!("year {} is out of range", year)))
}

/// Number of days in the given Gregorian year
pub fn days_in_year(year: i32) -> Result<u32> {
    let start = year_start(year)?;
    let next = year_start(year + 1)?;
    Ok(days_between(start, next) as u32)
}

/// Calendar date of an ordinal day counted from January 1 of `year`
///
/// Days past the end of the year roll into the next one.
pub fn date_from_day_of_year(year: i32, day_of_year: u32) -> Result<NaiveDate> {
    if day_of_year == 0 {
        return Err(SunMoonError::InvalidInput(
            "day of year is 1-based".to_string(),
        ));
    }
    let start = year_start(year)?;
    start
        .checked_add_signed(Duration::days(day_of_year as i64 - 1))
        .ok_or_else(|| {
            SunMoonError::InvalidInput(format!("day {} of {} is out of range", day_of_year, year))
        })
}
