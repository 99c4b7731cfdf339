//! Sun and Moon Sky Report
//!
//! Resolves an observer location, then prints where the Sun and Moon sit in
//! that observer's sky, their projected plotting vectors, the year's estimated
//! full moons and whether one of them falls on a given date.
//!
//! Usage:
//!   cargo run --bin sky_report -- --location "17.612778,80.042167" \
//!       --at 2024-11-15T06:00:00Z --event-date 2024-11-15

use std::path::PathBuf;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use clap::{ArgAction, Parser};
use log::{debug, LevelFilter};
use serde::Serialize;

use sunmoon::almanac::{FullMoonEvent, MatchTolerance};
use sunmoon::celestial::{CelestialBody, CelestialObject};
use sunmoon::config::Settings;
use sunmoon::coordinates::{CartesianVector, Dimension, GeoCoordinate, HorizontalPosition};
use sunmoon::geocoding::{resolve, NominatimGeocoder};
use sunmoon::paths::{daily_path, full_moon_paths, yearly_path, FullMoonPath, PathSample};
use sunmoon::projection::project;
use sunmoon::time::{day_of_year, TimePoint};
use sunmoon::SunMoonError;

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Sun and Moon Sky Report
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Reports simplified Sun and Moon sky positions and full-moon estimates",
    long_about = None
)]
struct Args {
    /// Place name, or "latitude,longitude"
    #[arg(short, long)]
    location: String,

    /// UTC instant in RFC 3339 form (defaults to now)
    #[arg(long)]
    at: Option<DateTime<Utc>>,

    /// Year for the full-moon schedule (defaults to the year of --at)
    #[arg(long)]
    year: Option<i32>,

    /// Date (YYYY-MM-DD) to look up among the estimated full moons
    #[arg(long)]
    event_date: Option<NaiveDate>,

    /// Accepted distance in days for the full-moon lookup (0 = exact)
    #[arg(long)]
    tolerance: Option<u32>,

    /// Settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Projection dimension, 2 or 3
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=3))]
    dimension: u8,

    /// Print a JSON document instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Include sampled yearly, daily and full-moon paths
    #[arg(long, action = ArgAction::SetTrue)]
    paths: bool,

    /// Display detailed debugging information
    #[arg(short, long, action = ArgAction::SetTrue)]
    debug: bool,
}

#[derive(Debug, Serialize)]
struct BodyReport {
    body: CelestialBody,
    position: HorizontalPosition,
    vector: CartesianVector,
}

#[derive(Debug, Serialize)]
struct EventLookup {
    date: NaiveDate,
    tolerance: MatchTolerance,
    matched: Option<FullMoonEvent>,
}

#[derive(Debug, Serialize)]
struct PathReport {
    sun_year: Vec<PathSample>,
    moon_year: Vec<PathSample>,
    moon_day: Vec<PathSample>,
    full_moons: Vec<FullMoonPath>,
}

#[derive(Debug, Serialize)]
struct Report {
    location: String,
    observer: GeoCoordinate,
    instant: DateTime<Utc>,
    time: TimePoint,
    bodies: Vec<BodyReport>,
    year: i32,
    full_moons: Vec<FullMoonEvent>,
    lookup: Option<EventLookup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    paths: Option<PathReport>,
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

/// Helper to print named values in a formatted way
fn print_named_value(name: &str, value: impl std::fmt::Display) {
    println!("{}: {}", name, value);
}

fn format_vector(vector: &CartesianVector) -> String {
    match vector.z() {
        Some(z) => format!("({:.4}, {:.4}, {:.4})", vector.x(), vector.y(), z),
        None => format!("({:.4}, {:.4})", vector.x(), vector.y()),
    }
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

fn build_report(args: &Args, settings: &Settings) -> Result<Report> {
    let dimension = Dimension::from_count(args.dimension)
        .ok_or_else(|| SunMoonError::InvalidInput(format!("dimension {}", args.dimension)))?;

    let geocoder = NominatimGeocoder::new(&settings.geocoder)?;
    let observer = resolve(&args.location, &geocoder)?;
    debug!("Observer at {}", observer);

    let instant = args.at.unwrap_or_else(Utc::now);
    let time = TimePoint::from_utc(&instant, &observer)?;
    debug!("{} is {} for this observer", instant, time);

    let mut bodies = Vec::new();
    for body in CelestialBody::all() {
        let position = body.horizontal_position(&time, &observer)?;
        let distance = match body {
            CelestialBody::Sun => settings.projection.sun_distance,
            CelestialBody::Moon => settings.projection.moon_distance,
        };
        let vector = project(&position, distance, dimension)?;
        bodies.push(BodyReport {
            body,
            position,
            vector,
        });
    }

    let year = args.year.unwrap_or_else(|| instant.year());
    let schedule = settings.lunar.schedule(year)?;
    let tolerance = settings.lunar.tolerance();

    let lookup = match args.event_date {
        Some(date) => {
            let matched = match schedule.locate_date(date, tolerance) {
                Ok(event) => Some(event),
                Err(SunMoonError::NotFound(reason)) => {
                    debug!("{}", reason);
                    None
                }
                Err(e) => return Err(e.into()),
            };
            Some(EventLookup {
                date,
                tolerance,
                matched,
            })
        }
        None => None,
    };

    let paths = if args.paths {
        let moon_day = args
            .event_date
            .map(day_of_year)
            .unwrap_or(time.day_of_year);
        Some(PathReport {
            sun_year: yearly_path(
                CelestialBody::Sun,
                &observer,
                12.0,
                settings.projection.sun_distance,
                dimension,
            )?,
            moon_year: yearly_path(
                CelestialBody::Moon,
                &observer,
                12.0,
                settings.projection.moon_distance,
                dimension,
            )?,
            moon_day: daily_path(
                CelestialBody::Moon,
                moon_day,
                &observer,
                1.0,
                settings.projection.moon_distance,
                dimension,
            )?,
            full_moons: full_moon_paths(&schedule, dimension)?,
        })
    } else {
        None
    };

    Ok(Report {
        location: args.location.clone(),
        observer,
        instant,
        time,
        bodies,
        year,
        full_moons: schedule.iter().collect(),
        lookup,
        paths,
    })
}

fn print_report(report: &Report) -> Result<()> {
    print_section_header("Observer");
    print_named_value("Location", &report.location);
    print_named_value("Coordinates", report.observer);
    print_named_value("UTC", report.instant.to_rfc3339());
    print_named_value("Local solar time", report.time);

    print_section_header("Sky Positions");
    for body in &report.bodies {
        print_named_value(body.body.name(), body.position);
        print_named_value(
            &format!("{} vector", body.body.name()),
            format_vector(&body.vector),
        );
    }

    print_section_header(&format!("Estimated Full Moons {}", report.year));
    for event in &report.full_moons {
        println!(
            "{:>2}  day {:>3}  {}",
            event.index + 1,
            event.day_of_year,
            event.date()?
        );
    }

    if let Some(lookup) = &report.lookup {
        print_section_header("Full Moon Lookup");
        print_named_value("Date", lookup.date);
        print_named_value("Tolerance", format!("{} day(s)", lookup.tolerance.max_days()));
        match &lookup.matched {
            Some(event) => print_named_value(
                "Match",
                format!("full moon {} on day {}", event.index + 1, event.day_of_year),
            ),
            None => print_named_value("Match", "none"),
        }
    }

    if let Some(paths) = &report.paths {
        print_section_header("Paths");
        print_named_value("Sun samples (year)", paths.sun_year.len());
        print_named_value("Moon samples (year)", paths.moon_year.len());
        print_named_value("Moon samples (day)", paths.moon_day.len());
        print_named_value("Full moon orbits", paths.full_moons.len());
    }

    Ok(())
}

fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(days) = args.tolerance {
        settings.lunar.tolerance_days = days;
    }

    let report = build_report(&args, &settings)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report)?;
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
