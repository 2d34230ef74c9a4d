use tracing::{debug, info, warn};

use super::error::DistanceError;
use super::providers::SegmentDistanceProvider;
use crate::domain::{Coordinate, Route};

/// Total driving distance in whole kilometers along
/// `origin -> waypoints... -> destination`.
///
/// Segments are queried one at a time in route order and summed. The first
/// failing segment aborts the call with its error; no later segment is queried
/// and no partial total is returned. Nothing is cached, so repeated calls
/// re-query every segment.
pub async fn compute_total_distance<P: SegmentDistanceProvider>(
    provider: &P,
    origin: Coordinate,
    destination: Coordinate,
    waypoints: &[Coordinate],
) -> Result<u64, DistanceError> {
    let route = Route::new(origin, destination, waypoints);
    compute_route_distance(provider, &route).await
}

/// Same as [`compute_total_distance`] for an already assembled [`Route`].
pub async fn compute_route_distance<P: SegmentDistanceProvider>(
    provider: &P,
    route: &Route,
) -> Result<u64, DistanceError> {
    info!(
        "Computing route distance ({} points, {} segments)",
        route.points().len(),
        route.segment_count()
    );

    let mut total_km = 0.0;
    for (index, (from, to)) in route.segments().enumerate() {
        let km = match provider.query_segment_distance(from, to).await {
            Ok(km) => km,
            Err(e) => {
                warn!("Segment {} ({} -> {}) failed: {}", index, from, to, e);
                return Err(e);
            }
        };
        debug!("Segment {} ({} -> {}): {:.3} km", index, from, to, km);
        total_km += km;
    }

    let total = total_km.round() as u64;
    info!("Route distance: {} km ({:.3} km unrounded)", total, total_km);
    Ok(total)
}
