//! Full-moon estimates
//!
//! Full moons are placed on a fixed grid: the first one on an assumed ordinal
//! day, each later one a synodic month (29.5 days) after the previous,
//! truncated to a whole day. The grid drifts from the true lunar calendar by a
//! day or more, so lookups take an explicit [`MatchTolerance`].

use crate::constants::{
    DEFAULT_FIRST_FULL_MOON_DAY, DEFAULT_FULL_MOON_COUNT, HOURS_PER_DAY, SYNODIC_MONTH_DAYS,
};
use crate::coordinates::{CartesianVector, Dimension, HorizontalPosition};
use crate::moonlib::{moon_orbit_point, moon_position};
use crate::time::{date_from_day_of_year, days_between, year_start};
use crate::{check_day_of_year, Result, SunMoonError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// How close an estimated full moon must be to a target day to match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchTolerance {
    /// The estimated day must equal the target
    #[default]
    Exact,
    /// The estimated day may differ from the target by up to this many days
    WithinDays(u32),
}

impl MatchTolerance {
    /// Maximum accepted distance in days
    pub fn max_days(&self) -> u32 {
        match self {
            MatchTolerance::Exact => 0,
            MatchTolerance::WithinDays(days) => *days,
        }
    }

    /// `0` is exact, anything larger a day window
    pub fn from_days(days: u32) -> Self {
        if days == 0 {
            MatchTolerance::Exact
        } else {
            MatchTolerance::WithinDays(days)
        }
    }
}

/// One estimated full moon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullMoonEvent {
    /// Position in the generated sequence, from 0
    pub index: usize,
    /// Estimated ordinal day counted from `year_anchor`
    pub day_of_year: u32,
    /// January 1 of the schedule's year
    pub year_anchor: NaiveDate,
}

impl FullMoonEvent {
    /// Calendar date of the estimate; late estimates roll into the next year
    pub fn date(&self) -> Result<NaiveDate> {
        date_from_day_of_year(self.year_anchor.year(), self.day_of_year)
    }

    /// Moon position on the estimated day at a local decimal hour
    pub fn moon_position(&self, hour: f64, latitude: f64) -> Result<HorizontalPosition> {
        moon_position(self.day_of_year, hour, latitude)
    }

    /// Hourly Moon orbit points across the estimated day
    pub fn moon_path(&self, dimension: Dimension) -> Result<Vec<CartesianVector>> {
        (0..HOURS_PER_DAY as u32)
            .map(|hour| moon_orbit_point(self.day_of_year, hour as f64, dimension))
            .collect()
    }
}

/// Parameters of a year's full-moon grid
///
/// A schedule is a small `Copy` value; every call to [`FullMoonSchedule::iter`]
/// starts a fresh, lazily evaluated pass over the same events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FullMoonSchedule {
    year: i32,
    year_anchor: NaiveDate,
    first_full_moon_day: u32,
    synodic_period: f64,
    count: usize,
}

impl FullMoonSchedule {
    /// Create a validated schedule
    pub fn new(
        year: i32,
        first_full_moon_day: u32,
        synodic_period: f64,
        count: usize,
    ) -> Result<Self> {
        check_day_of_year(first_full_moon_day)?;
        if !synodic_period.is_finite() || synodic_period <= 0.0 {
            return Err(SunMoonError::InvalidInput(format!(
                "synodic period {} must be finite and positive",
                synodic_period
            )));
        }
        let last = first_full_moon_day as f64 + count.saturating_sub(1) as f64 * synodic_period;
        if last > u32::MAX as f64 {
            return Err(SunMoonError::InvalidInput(format!(
                "{} full moons every {} days overflow the day counter",
                count, synodic_period
            )));
        }

        Ok(Self {
            year,
            year_anchor: year_start(year)?,
            first_full_moon_day,
            synodic_period,
            count,
        })
    }

    /// Schedule with the default first day (15), period (29.5) and count (12)
    pub fn for_year(year: i32) -> Result<Self> {
        Self::new(
            year,
            DEFAULT_FIRST_FULL_MOON_DAY,
            SYNODIC_MONTH_DAYS,
            DEFAULT_FULL_MOON_COUNT,
        )
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn first_full_moon_day(&self) -> u32 {
        self.first_full_moon_day
    }

    pub fn synodic_period(&self) -> f64 {
        self.synodic_period
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Estimated day of the `index`-th full moon
    pub fn day(&self, index: usize) -> Option<u32> {
        if index >= self.count {
            return None;
        }
        let day = self.first_full_moon_day as f64 + index as f64 * self.synodic_period;
        Some(day.trunc() as u32)
    }

    /// Event at `index`, if inside the schedule
    pub fn event(&self, index: usize) -> Option<FullMoonEvent> {
        self.day(index).map(|day_of_year| FullMoonEvent {
            index,
            day_of_year,
            year_anchor: self.year_anchor,
        })
    }

    /// Fresh pass over the schedule's events
    pub fn iter(&self) -> FullMoonIter {
        FullMoonIter {
            schedule: *self,
            next: 0,
        }
    }

    /// Find the estimate closest to a calendar date
    ///
    /// The target is the date's ordinal offset from January 1 of the schedule
    /// year, so dates in other years are compared on the same day counter.
    pub fn locate_date(&self, date: NaiveDate, tolerance: MatchTolerance) -> Result<FullMoonEvent> {
        let target = days_between(self.year_anchor, date) + 1;
        nearest(self.iter(), target, tolerance)
    }
}

impl IntoIterator for FullMoonSchedule {
    type Item = FullMoonEvent;
    type IntoIter = FullMoonIter;

    fn into_iter(self) -> FullMoonIter {
        self.iter()
    }
}

impl IntoIterator for &FullMoonSchedule {
    type Item = FullMoonEvent;
    type IntoIter = FullMoonIter;

    fn into_iter(self) -> FullMoonIter {
        self.iter()
    }
}

/// Iterator over a [`FullMoonSchedule`]
#[derive(Debug, Clone)]
pub struct FullMoonIter {
    schedule: FullMoonSchedule,
    next: usize,
}

impl Iterator for FullMoonIter {
    type Item = FullMoonEvent;

    fn next(&mut self) -> Option<FullMoonEvent> {
        let event = self.schedule.event(self.next)?;
        self.next += 1;
        Some(event)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.schedule.count.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FullMoonIter {}

impl FusedIterator for FullMoonIter {}

/// Estimated full moons of a year
///
/// `day_i = trunc(first_full_moon_day + i · synodic_period)` for `i` in
/// `0..count`.
pub fn full_moon_days(
    year: i32,
    first_full_moon_day: u32,
    synodic_period: f64,
    count: usize,
) -> Result<FullMoonSchedule> {
    FullMoonSchedule::new(year, first_full_moon_day, synodic_period, count)
}

/// Find the estimated full moon matching a target day of year
///
/// The closest estimate within `tolerance` wins, the earlier one on a tie.
/// Returns [`SunMoonError::NotFound`] when nothing is close enough.
pub fn locate_event<I>(days: I, target_day: u32, tolerance: MatchTolerance) -> Result<FullMoonEvent>
where
    I: IntoIterator<Item = FullMoonEvent>,
{
    check_day_of_year(target_day)?;
    nearest(days, target_day as i64, tolerance)
}

fn nearest<I>(days: I, target: i64, tolerance: MatchTolerance) -> Result<FullMoonEvent>
where
    I: IntoIterator<Item = FullMoonEvent>,
{
    let max_days = tolerance.max_days() as i64;
    let mut best: Option<(i64, FullMoonEvent)> = None;

    for event in days {
        let distance = (event.day_of_year as i64 - target).abs();
        if distance > max_days {
            continue;
        }
        match best {
            Some((best_distance, _)) if best_distance <= distance => {}
            _ => best = Some((distance, event)),
        }
    }

    best.map(|(_, event)| event).ok_or_else(|| {
        SunMoonError::NotFound(format!(
            "no estimated full moon within {} day(s) of day {}",
            max_days, target
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DAYS_2024: [u32; 12] = [15, 44, 74, 103, 133, 162, 192, 221, 251, 280, 310, 339];

    #[test]
    fn test_default_schedule_days() {
        let schedule = full_moon_days(2024, 15, 29.5, 12).unwrap();
        let days: Vec<u32> = schedule.iter().map(|e| e.day_of_year).collect();
        assert_eq!(days, DAYS_2024);
        assert_eq!(schedule, FullMoonSchedule::for_year(2024).unwrap());
    }

    #[test]
    fn test_schedule_is_restartable() {
        let schedule = FullMoonSchedule::for_year(2024).unwrap();
        let first: Vec<FullMoonEvent> = schedule.iter().collect();
        let second: Vec<FullMoonEvent> = schedule.into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 12);
        assert!(first.iter().enumerate().all(|(i, e)| e.index == i));

        let mut iter = schedule.iter();
        assert_eq!(iter.len(), 12);
        iter.next();
        assert_eq!(iter.len(), 11);
        assert_eq!(iter.by_ref().count(), 11);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_event_dates() {
        let schedule = FullMoonSchedule::for_year(2024).unwrap();
        let november = schedule.event(10).unwrap();
        assert_eq!(november.day_of_year, 310);
        assert_eq!(november.date().unwrap(), NaiveDate::from_ymd_opt(2024, 11, 5).unwrap());
        assert_eq!(
            november.year_anchor,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert!(schedule.event(12).is_none());
    }

    #[test]
    fn test_exact_lookup_misses_kartheeka() {
        let schedule = FullMoonSchedule::for_year(2024).unwrap();
        let result = locate_event(schedule, 320, MatchTolerance::Exact);
        assert!(matches!(result, Err(SunMoonError::NotFound(_))));

        let result = locate_event(schedule, 320, MatchTolerance::WithinDays(1));
        assert!(matches!(result, Err(SunMoonError::NotFound(_))));

        let kartheeka = NaiveDate::from_ymd_opt(2024, 11, 15).unwrap();
        assert!(schedule.locate_date(kartheeka, MatchTolerance::default()).is_err());
    }

    #[rstest]
    #[case(310, MatchTolerance::Exact, 10)]
    #[case(15, MatchTolerance::Exact, 0)]
    #[case(320, MatchTolerance::WithinDays(10), 10)]
    #[case(45, MatchTolerance::WithinDays(1), 1)]
    #[case(59, MatchTolerance::WithinDays(15), 1)]
    #[case(366, MatchTolerance::WithinDays(30), 11)]
    fn test_lookup_hits(
        #[case] target: u32,
        #[case] tolerance: MatchTolerance,
        #[case] expected_index: usize,
    ) {
        let schedule = FullMoonSchedule::for_year(2024).unwrap();
        let event = locate_event(&schedule, target, tolerance).unwrap();
        assert_eq!(event.index, expected_index);
    }

    #[test]
    fn test_locate_date_across_year_boundary() {
        let schedule = full_moon_days(2024, 15, 29.5, 13).unwrap();
        assert_eq!(schedule.day(12), Some(369));
        let event = schedule
            .locate_date(NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(), MatchTolerance::Exact)
            .unwrap();
        assert_eq!(event.index, 12);
        assert_eq!(event.date().unwrap(), NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
    }

    #[test]
    fn test_invalid_schedules() {
        assert!(matches!(
            full_moon_days(2024, 0, 29.5, 12),
            Err(SunMoonError::InvalidInput(_))
        ));
        assert!(full_moon_days(2024, 15, 0.0, 12).is_err());
        assert!(full_moon_days(2024, 15, f64::NAN, 12).is_err());
        assert!(full_moon_days(400_000, 15, 29.5, 12).is_err());
        let schedule = FullMoonSchedule::for_year(2024).unwrap();
        assert!(locate_event(schedule, 0, MatchTolerance::Exact).is_err());
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = full_moon_days(2024, 15, 29.5, 0).unwrap();
        assert!(schedule.is_empty());
        assert_eq!(schedule.iter().count(), 0);
        assert!(locate_event(schedule, 15, MatchTolerance::WithinDays(365)).is_err());
    }

    #[test]
    fn test_event_moon_path() {
        let event = FullMoonSchedule::for_year(2024).unwrap().event(0).unwrap();
        let path = event.moon_path(Dimension::Three).unwrap();
        assert_eq!(path.len(), 24);
        assert_eq!(path[0], moon_orbit_point(15, 0.0, Dimension::Three).unwrap());

        let pos = event.moon_position(12.0, 17.6).unwrap();
        assert_eq!(pos, moon_position(15, 12.0, 17.6).unwrap());
    }
}
