use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{CoordinateError, RoutePoint};

#[derive(Debug, Error)]
pub enum RouteInputError {
    #[error("failed to read route file: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: {source}")]
    Point {
        line: u64,
        #[source]
        source: CoordinateError,
    },

    #[error("invalid route point {value:?}: {source}")]
    Argument {
        value: String,
        #[source]
        source: CoordinateError,
    },
}

/// Parses command line route points in the order given.
pub fn parse_route_args<S: AsRef<str>>(args: &[S]) -> Result<Vec<RoutePoint>, RouteInputError> {
    args.iter()
        .map(|arg| {
            let value = arg.as_ref();
            value
                .parse::<RoutePoint>()
                .map_err(|source| RouteInputError::Argument {
                    value: value.to_string(),
                    source,
                })
        })
        .collect()
}

/// Reads route points from a CSV file. See [`read_route_points`].
pub fn read_route_file(path: impl AsRef<Path>) -> Result<Vec<RoutePoint>, RouteInputError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    let points = read_route_points(file)?;
    info!("Loaded {} route points from {}", points.len(), path.display());
    Ok(points)
}

/// Each row is either `lat,lng` or a single place column. Files may start
/// with a header row; a first row with two non-numeric columns is skipped.
/// Empty rows are ignored.
pub fn read_route_points<R: io::Read>(reader: R) -> Result<Vec<RoutePoint>, RouteInputError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let record = row?;
        let fields: Vec<&str> = record.iter().filter(|f| !f.is_empty()).collect();
        if fields.is_empty() {
            continue;
        }

        if idx == 0 && looks_like_header(&record) {
            debug!("Skipping header row {:?}", fields);
            continue;
        }

        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 1);
        let value = fields.join(",");
        let point = value
            .parse::<RoutePoint>()
            .map_err(|source| RouteInputError::Point { line, source })?;
        points.push(point);
    }

    Ok(points)
}

fn looks_like_header(record: &StringRecord) -> bool {
    record.len() == 2 && record.iter().all(|f| f.parse::<f64>().is_err())
}
