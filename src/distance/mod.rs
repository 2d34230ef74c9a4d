pub mod aggregator;
pub mod error;
pub mod providers;

pub use aggregator::{compute_route_distance, compute_total_distance};
pub use error::{DistanceError, TransportError};
pub use providers::{GoogleDistanceMatrix, SegmentDistanceProvider};
