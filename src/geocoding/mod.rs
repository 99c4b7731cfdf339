//! Location lookup for observers
//!
//! Turns what a user types into a [`GeoCoordinate`]: either a numeric
//! `latitude,longitude` pair or a place name handed to a [`Geocoder`]. The
//! models never call into this module; it only feeds them coordinates.

use std::collections::HashMap;
use std::time::Duration;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::Deserialize;

use crate::config::GeocoderSettings;
use crate::coordinates::GeoCoordinate;
use crate::{Result, SunMoonError};

lazy_static! {
    static ref COORDINATE_PAIR: Regex = Regex::new(
        r"^\s*([+-]?\d+(?:\.\d+)?)\s*°?\s*([NnSs])?\s*,\s*([+-]?\d+(?:\.\d+)?)\s*°?\s*([EeWw])?\s*$"
    )
    .expect("coordinate pattern is valid");
}

/// Resolves place names to coordinates
pub trait Geocoder {
    fn resolve_location(&self, name: &str) -> Result<GeoCoordinate>;
}

/// Parse a `latitude,longitude` pair
///
/// Accepts signed decimals (`17.6128,80.0422`) or unsigned values with
/// hemisphere letters (`17.6128N, 80.0422E`). A hemisphere letter on a signed
/// value is rejected as ambiguous.
pub fn parse_coordinates(input: &str) -> Result<GeoCoordinate> {
    let caps = COORDINATE_PAIR.captures(input).ok_or_else(|| {
        SunMoonError::InvalidInput(format!(
            "{:?} is not a 'latitude,longitude' pair",
            input
        ))
    })?;

    let latitude = signed_component(&caps[1], caps.get(2).map(|m| m.as_str()), 'S')?;
    let longitude = signed_component(&caps[3], caps.get(4).map(|m| m.as_str()), 'W')?;
    GeoCoordinate::new(latitude, longitude)
}

fn signed_component(number: &str, hemisphere: Option<&str>, negative: char) -> Result<f64> {
    let value: f64 = number
        .parse()
        .map_err(|e| SunMoonError::InvalidInput(format!("{:?}: {}", number, e)))?;

    match hemisphere {
        None => Ok(value),
        Some(_) if number.starts_with(['+', '-']) => Err(SunMoonError::InvalidInput(format!(
            "{:?} has both a sign and a hemisphere",
            number
        ))),
        Some(letter) if letter.eq_ignore_ascii_case(&negative.to_string()) => Ok(-value),
        Some(_) => Ok(value),
    }
}

/// Coordinates from a pair if the input has a comma, else from the geocoder
pub fn resolve(input: &str, geocoder: &dyn Geocoder) -> Result<GeoCoordinate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(SunMoonError::InvalidInput("empty location".to_string()));
    }
    if input.contains(',') {
        parse_coordinates(input)
    } else {
        geocoder.resolve_location(input)
    }
}

/// Geocoder backed by a fixed, case-insensitive table
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    places: HashMap<String, GeoCoordinate>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named place
    pub fn with_place(mut self, name: &str, coordinate: GeoCoordinate) -> Self {
        self.places.insert(name.trim().to_lowercase(), coordinate);
        self
    }
}

impl Geocoder for StaticGeocoder {
    fn resolve_location(&self, name: &str) -> Result<GeoCoordinate> {
        self.places
            .get(&name.trim().to_lowercase())
            .copied()
            .ok_or_else(|| SunMoonError::NotFound(format!("location {:?}", name)))
    }
}

/// One entry of a Nominatim search response
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

/// Geocoder using the OpenStreetMap Nominatim search API
#[derive(Debug)]
pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl NominatimGeocoder {
    /// Create a geocoder from settings
    pub fn new(settings: &GeocoderSettings) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| SunMoonError::Geocoding(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
        })
    }
}

impl Geocoder for NominatimGeocoder {
    fn resolve_location(&self, name: &str) -> Result<GeoCoordinate> {
        debug!("Geocoding {:?} via {}", name, self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", name), ("format", "json"), ("limit", "1")])
            .send()
            .map_err(|e| SunMoonError::Geocoding(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SunMoonError::Geocoding(format!(
                "Geocoder returned status {}",
                response.status()
            )));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .map_err(|e| SunMoonError::Geocoding(format!("Malformed response: {}", e)))?;

        first_coordinate(places, name)
    }
}

fn first_coordinate(places: Vec<NominatimPlace>, name: &str) -> Result<GeoCoordinate> {
    let place = places
        .into_iter()
        .next()
        .ok_or_else(|| SunMoonError::NotFound(format!("location {:?}", name)))?;

    let parse = |value: &str| {
        value
            .parse::<f64>()
            .map_err(|e| SunMoonError::Geocoding(format!("Bad coordinate {:?}: {}", value, e)))
    };
    let coordinate = GeoCoordinate::new(parse(&place.lat)?, parse(&place.lon)?)?;
    debug!("Resolved {:?} to {} ({})", name, coordinate, place.display_name);
    Ok(coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("17.612778,80.042167", 17.612778, 80.042167)]
    #[case(" -33.86 , 151.21 ", -33.86, 151.21)]
    #[case("17.6N, 80.0E", 17.6, 80.0)]
    #[case("33.86s,70.5w", -33.86, -70.5)]
    #[case("51.5°N, 0.12°W", 51.5, -0.12)]
    #[case("+10,-20", 10.0, -20.0)]
    fn test_parse_coordinates(#[case] input: &str, #[case] lat: f64, #[case] lon: f64) {
        let coord = parse_coordinates(input).unwrap();
        assert_eq!(coord.latitude, lat);
        assert_eq!(coord.longitude, lon);
    }

    #[rstest]
    #[case("India")]
    #[case("17.6")]
    #[case("abc,def")]
    #[case("-17.6S,80")]
    #[case("95,10")]
    #[case("10,190")]
    fn test_parse_coordinates_rejects(#[case] input: &str) {
        assert!(matches!(
            parse_coordinates(input),
            Err(SunMoonError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_resolve_dispatch() {
        let geocoder = StaticGeocoder::new()
            .with_place("Bhadrachalam", GeoCoordinate::new(17.612778, 80.042167).unwrap());

        let by_name = resolve("  bhadrachalam ", &geocoder).unwrap();
        assert_eq!(by_name.latitude, 17.612778);

        let by_pair = resolve("1.5,2.5", &geocoder).unwrap();
        assert_eq!(by_pair.longitude, 2.5);

        assert!(matches!(
            resolve("Atlantis", &geocoder),
            Err(SunMoonError::NotFound(_))
        ));
        assert!(matches!(resolve("   ", &geocoder), Err(SunMoonError::InvalidInput(_))));
    }

    #[test]
    fn test_nominatim_response_parsing() {
        let body = r#"[{"place_id": 1, "lat": "20.5936832", "lon": "78.962883",
            "display_name": "India"}]"#;
        let places: Vec<NominatimPlace> = serde_json::from_str(body).unwrap();
        let coord = first_coordinate(places, "India").unwrap();
        assert_eq!(coord.latitude, 20.5936832);
        assert_eq!(coord.longitude, 78.962883);

        let empty: Vec<NominatimPlace> = serde_json::from_str("[]").unwrap();
        assert!(matches!(
            first_coordinate(empty, "Nowhere"),
            Err(SunMoonError::NotFound(_))
        ));

        let bad: Vec<NominatimPlace> =
            serde_json::from_str(r#"[{"lat": "north", "lon": "0"}]"#).unwrap();
        assert!(matches!(
            first_coordinate(bad, "Odd"),
            Err(SunMoonError::Geocoding(_))
        ));
    }

    // Skip this test in CI as it requires network access
    #[test]
    #[ignore]
    fn test_nominatim_lookup() {
        let geocoder = NominatimGeocoder::new(&GeocoderSettings::default()).unwrap();
        let india = geocoder.resolve_location("India").unwrap();
        assert!((india.latitude - 22.0).abs() < 10.0);
        assert!((india.longitude - 79.0).abs() < 10.0);
    }
}
