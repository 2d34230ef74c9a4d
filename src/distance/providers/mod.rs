pub mod google;

pub use google::GoogleDistanceMatrix;

use crate::distance::error::DistanceError;
use crate::domain::Coordinate;

/// One driving-distance lookup between two points.
#[allow(async_fn_in_trait)]
pub trait SegmentDistanceProvider {
    /// Driving distance from `origin` to `destination` in kilometers.
    async fn query_segment_distance(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<f64, DistanceError>;
}
