pub mod error;
pub mod types;

pub use error::CoordinateError;
pub use types::{Coordinate, Route, RoutePoint};
