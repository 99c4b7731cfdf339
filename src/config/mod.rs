//! Settings for the outer layers (CLI, geocoding)
//!
//! Settings come from a JSON file or defaults, then a few environment
//! variables override individual values. The core models never read
//! settings; callers pass the values they need as arguments.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::almanac::{FullMoonSchedule, MatchTolerance};
use crate::constants::{
    DEFAULT_FIRST_FULL_MOON_DAY, DEFAULT_FULL_MOON_COUNT, MOON_PLOT_DISTANCE, SUN_PLOT_DISTANCE,
    SYNODIC_MONTH_DAYS,
};
use crate::{Result, SunMoonError};

/// Environment variable overriding the geocoder endpoint
pub const ENV_GEOCODER_URL: &str = "SUNMOON_GEOCODER_URL";
/// Environment variable overriding the geocoder user agent
pub const ENV_USER_AGENT: &str = "SUNMOON_USER_AGENT";
/// Environment variable overriding the full-moon match tolerance in days
pub const ENV_TOLERANCE_DAYS: &str = "SUNMOON_TOLERANCE_DAYS";

/// OpenStreetMap Nominatim search endpoint
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";
/// User agent sent to the geocoder
pub const DEFAULT_USER_AGENT: &str = "sun_moon_simulator";

/// Full-moon grid parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LunarSettings {
    pub first_full_moon_day: u32,
    pub synodic_period: f64,
    pub count: usize,
    /// Accepted distance between an estimate and a target date; 0 is exact
    pub tolerance_days: u32,
}

impl Default for LunarSettings {
    fn default() -> Self {
        Self {
            first_full_moon_day: DEFAULT_FIRST_FULL_MOON_DAY,
            synodic_period: SYNODIC_MONTH_DAYS,
            count: DEFAULT_FULL_MOON_COUNT,
            tolerance_days: 0,
        }
    }
}

impl LunarSettings {
    /// Schedule for `year` with these parameters
    pub fn schedule(&self, year: i32) -> Result<FullMoonSchedule> {
        FullMoonSchedule::new(
            year,
            self.first_full_moon_day,
            self.synodic_period,
            self.count,
        )
    }

    pub fn tolerance(&self) -> MatchTolerance {
        MatchTolerance::from_days(self.tolerance_days)
    }
}

/// Plotting distances handed to the projector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    pub sun_distance: f64,
    pub moon_distance: f64,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            sun_distance: SUN_PLOT_DISTANCE,
            moon_distance: MOON_PLOT_DISTANCE,
        }
    }
}

/// Geocoder connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderSettings {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

/// All settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub lunar: LunarSettings,
    pub projection: ProjectionSettings,
    pub geocoder: GeocoderSettings,
}

/// Get the config directory path
pub fn get_config_dir() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config").join("sunmoon")
}

/// Default settings file location
pub fn default_config_path() -> PathBuf {
    get_config_dir().join("config.json")
}

impl Settings {
    /// Read settings from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_json::from_str(&text)?;
        debug!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Settings from an explicit file, the default file if present, or defaults
    ///
    /// Environment overrides are applied and the result validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = default_config_path();
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    debug!("No settings file at {}, using defaults", default_path.display());
                    Self::default()
                }
            }
        };
        settings.apply_overrides(|key| env::var(key).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply overrides looked up by environment variable name
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_GEOCODER_URL) {
            debug!("{} overrides geocoder endpoint", ENV_GEOCODER_URL);
            self.geocoder.endpoint = url;
        }
        if let Some(agent) = lookup(ENV_USER_AGENT) {
            self.geocoder.user_agent = agent;
        }
        if let Some(days) = lookup(ENV_TOLERANCE_DAYS) {
            self.lunar.tolerance_days = days.trim().parse().map_err(|e| {
                SunMoonError::Config(format!("{}={:?}: {}", ENV_TOLERANCE_DAYS, days, e))
            })?;
        }
        Ok(())
    }

    /// Reject values the engine or geocoder cannot use
    pub fn validate(&self) -> Result<()> {
        self.lunar
            .schedule(2000)
            .map_err(|e| SunMoonError::Config(format!("lunar settings: {}", e)))?;

        for (name, distance) in [
            ("sun_distance", self.projection.sun_distance),
            ("moon_distance", self.projection.moon_distance),
        ] {
            if !distance.is_finite() || distance <= 0.0 {
                return Err(SunMoonError::Config(format!(
                    "{} must be finite and positive, got {}",
                    name, distance
                )));
            }
        }

        if self.geocoder.endpoint.trim().is_empty() {
            return Err(SunMoonError::Config("geocoder endpoint is empty".to_string()));
        }
        if self.geocoder.timeout_secs == 0 {
            return Err(SunMoonError::Config("geocoder timeout must be positive".to_string()));
        }
        Ok(())
    }
}
