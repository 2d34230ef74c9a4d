use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use super::error::CoordinateError;

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, rejecting values outside lat [-90, 90] / lng [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lng_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
        if !lat_ok || !lng_ok {
            return Err(CoordinateError::OutOfRange {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

// Providers expect "lat,lng".
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| CoordinateError::Malformed(s.to_string()))?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| CoordinateError::Malformed(s.to_string()))?;
        let lng = lng
            .trim()
            .parse::<f64>()
            .map_err(|_| CoordinateError::Malformed(s.to_string()))?;
        Coordinate::new(lat, lng)
    }
}

/// Ordered points `[origin, waypoints..., destination]`, always at least two.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    points: Vec<Coordinate>,
}

impl Route {
    pub fn new(origin: Coordinate, destination: Coordinate, waypoints: &[Coordinate]) -> Self {
        let mut points = Vec::with_capacity(waypoints.len() + 2);
        points.push(origin);
        points.extend_from_slice(waypoints);
        points.push(destination);
        Self { points }
    }

    /// Builds a route from a flat list; `None` when fewer than two points.
    pub fn from_points(points: Vec<Coordinate>) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        Some(Self { points })
    }

    pub fn origin(&self) -> Coordinate {
        self.points[0]
    }

    pub fn destination(&self) -> Coordinate {
        self.points[self.points.len() - 1]
    }

    pub fn waypoints(&self) -> &[Coordinate] {
        &self.points[1..self.points.len() - 1]
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Consecutive `(from, to)` pairs in route order.
    pub fn segments(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.points.iter().copied().tuple_windows()
    }
}

/// A route point as typed by the user, before geocoding.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutePoint {
    Coordinate(Coordinate),
    Place(String),
}

impl FromStr for RoutePoint {
    type Err = CoordinateError;

    /// Two comma-separated numbers are a coordinate (and must be in range);
    /// anything else is a place query.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Coordinate>() {
            Ok(coord) => Ok(RoutePoint::Coordinate(coord)),
            Err(CoordinateError::Malformed(_)) => Ok(RoutePoint::Place(s.trim().to_string())),
            Err(e) => Err(e),
        }
    }
}
