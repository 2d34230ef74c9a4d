pub mod init;
pub mod input;

pub use init::{resolve_route, ResolveError};
pub use input::{parse_route_args, read_route_file, read_route_points, RouteInputError};
