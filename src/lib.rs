pub mod cli;
pub mod config;
pub mod distance;
pub mod domain;
pub mod geocoding;
pub mod setup;

#[cfg(test)]
mod test_utils;

pub use distance::{compute_route_distance, compute_total_distance, DistanceError};
pub use domain::{Coordinate, Route};
