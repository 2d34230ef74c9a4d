use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{Route, RoutePoint};
use crate::geocoding::{GeocodeError, NominatimGeocoder};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("a route needs an origin and a destination, got {0} point(s)")]
    TooFewPoints(usize),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),
}

/// Turns user route points into a [`Route`]. Place queries are geocoded one
/// at a time in route order; the first lookup failure aborts.
pub async fn resolve_route(
    points: &[RoutePoint],
    geocoder: &NominatimGeocoder,
) -> Result<Route, ResolveError> {
    if points.len() < 2 {
        return Err(ResolveError::TooFewPoints(points.len()));
    }

    let mut coords = Vec::with_capacity(points.len());
    for point in points {
        let coord = match point {
            RoutePoint::Coordinate(coord) => *coord,
            RoutePoint::Place(query) => geocoder.geocode(query).await?,
        };
        debug!("Route point {}: {}", coords.len(), coord);
        coords.push(coord);
    }
    info!("Resolved {} route points", coords.len());

    Route::from_points(coords).ok_or(ResolveError::TooFewPoints(points.len()))
}
