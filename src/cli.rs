use std::error::Error;
use std::future::Future;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use colored::*;
use tracing::{error, info, info_span, Instrument};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::constant::DEFAULT_DEADLINE_SECS;
use crate::config::Settings;
use crate::distance::{compute_route_distance, GoogleDistanceMatrix};
use crate::domain::RoutePoint;
use crate::geocoding::NominatimGeocoder;
use crate::setup::{parse_route_args, read_route_file, resolve_route};

/// Total driving distance along a route, one provider query per segment.
#[derive(Debug, Parser)]
#[command(name = "route-distance", version)]
pub struct Args {
    /// Route points in order: origin, waypoints..., destination.
    /// Each is "lat,lng" or a place name to geocode.
    #[arg(allow_hyphen_values = true)]
    pub points: Vec<String>,

    /// CSV file with one route point per row, read before POINTS.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Overall deadline for resolving and measuring the route.
    #[arg(long, default_value_t = DEFAULT_DEADLINE_SECS)]
    pub deadline_secs: u64,
}

/// Installs the `tracing` subscriber (filter from `RUST_LOG`).
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE),
        )
        .init();
}

/// Runs one measurement and prints either the total or why it is unavailable.
pub async fn run(args: Args) -> ExitCode {
    let outcome = report(&measure_args(&args).await);
    if outcome.success {
        println!("{}", outcome.line);
        ExitCode::SUCCESS
    } else {
        eprintln!("{}", outcome.line);
        ExitCode::FAILURE
    }
}

/// What the user sees for a finished measurement.
#[derive(Debug)]
pub struct Report {
    pub line: String,
    pub success: bool,
}

/// A failure never carries a number, not even zero.
pub fn report(result: &Result<u64, Box<dyn Error>>) -> Report {
    match result {
        Ok(total_km) => Report {
            line: format!("{} {} km", "Total distance:".green().bold(), total_km),
            success: true,
        },
        Err(e) => {
            error!("Route distance failed: {}", e);
            Report {
                line: format!("{} {}", "Distance unavailable:".red().bold(), e),
                success: false,
            }
        }
    }
}

async fn measure_args(args: &Args) -> Result<u64, Box<dyn Error>> {
    let settings = Settings::from_env()?;
    info!("Settings: {:?}", settings);

    let mut points: Vec<RoutePoint> = Vec::new();
    if let Some(path) = &args.file {
        points.extend(read_route_file(path)?);
    }
    points.extend(parse_route_args(&args.points)?);

    let span = info_span!("route", points = points.len());
    with_deadline(args.deadline_secs, measure(&settings, &points).instrument(span)).await
}

async fn with_deadline<F>(deadline_secs: u64, measurement: F) -> Result<u64, Box<dyn Error>>
where
    F: Future<Output = Result<u64, Box<dyn Error>>>,
{
    match tokio::time::timeout(Duration::from_secs(deadline_secs), measurement).await {
        Ok(result) => result,
        Err(_) => Err(format!("deadline of {}s exceeded", deadline_secs).into()),
    }
}

async fn measure(settings: &Settings, points: &[RoutePoint]) -> Result<u64, Box<dyn Error>> {
    let geocoder = NominatimGeocoder::new(settings.nominatim_email.as_deref())
        .with_base_url(settings.nominatim_url.as_str());
    let route = resolve_route(points, &geocoder).await?;

    let provider = GoogleDistanceMatrix::new(settings.google_api_key.as_str())
        .with_base_url(settings.distance_matrix_url.as_str());
    Ok(compute_route_distance(&provider, &route).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceError;
    use crate::domain::Coordinate;

    #[test]
    fn parses_points_and_options() {
        let args = Args::try_parse_from([
            "route-distance",
            "--file",
            "stops.csv",
            "--deadline-secs",
            "5",
            "Rosario",
            "-34.6,-58.4",
        ])
        .unwrap();
        assert_eq!(args.file, Some(PathBuf::from("stops.csv")));
        assert_eq!(args.deadline_secs, 5);
        assert_eq!(args.points, vec!["Rosario", "-34.6,-58.4"]);
    }

    #[test]
    fn deadline_defaults() {
        let args = Args::try_parse_from(["route-distance", "1,2", "3,4"]).unwrap();
        assert_eq!(args.deadline_secs, DEFAULT_DEADLINE_SECS);
        assert_eq!(args.file, None);
    }

    #[test]
    fn total_is_reported_on_success() {
        let outcome = report(&Ok(58));
        assert!(outcome.success);
        assert!(outcome.line.contains("Total distance:"), "{}", outcome.line);
        assert!(outcome.line.contains("58 km"), "{}", outcome.line);
    }

    #[test]
    fn failure_reports_unavailable_without_a_total() {
        let err = DistanceError::NoData {
            origin: Coordinate::new(1.0, 2.0).unwrap(),
            destination: Coordinate::new(3.0, 4.0).unwrap(),
            reason: "element status ZERO_RESULTS".to_string(),
        };
        let outcome = report(&Err(err.into()));
        assert!(!outcome.success);
        assert!(outcome.line.contains("Distance unavailable:"), "{}", outcome.line);
        assert!(outcome.line.contains("ZERO_RESULTS"), "{}", outcome.line);
        assert!(!outcome.line.contains("Total distance"), "{}", outcome.line);
        assert!(!outcome.line.contains(" km"), "{}", outcome.line);
    }

    #[tokio::test]
    async fn deadline_turns_into_unavailable() {
        let result = with_deadline(0, std::future::pending::<Result<u64, Box<dyn Error>>>()).await;
        assert_eq!(
            result.as_ref().unwrap_err().to_string(),
            "deadline of 0s exceeded"
        );

        let outcome = report(&result);
        assert!(!outcome.success);
        assert!(outcome.line.contains("deadline of 0s exceeded"));
    }

    #[tokio::test]
    async fn finished_measurement_passes_through_deadline() {
        let result = with_deadline(5, async { Ok::<u64, Box<dyn Error>>(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }
}
