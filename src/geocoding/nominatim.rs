use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::config::constant::{NOMINATIM_URL, USER_AGENT};
use crate::domain::{Coordinate, CoordinateError};

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("geocoder returned HTTP {0}")]
    Status(StatusCode),

    #[error("could not decode geocoder response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no place found for {0:?}")]
    NotFound(String),

    #[error("geocoder returned an unusable coordinate for {query:?}: {reason}")]
    InvalidCoordinate { query: String, reason: String },
}

/// Forward geocoding against a Nominatim search endpoint.
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl NominatimGeocoder {
    pub fn new(contact_email: Option<&str>) -> Self {
        // Nominatim's usage policy asks for an identifying User-Agent.
        let user_agent = match contact_email {
            Some(email) => format!("{} ({})", USER_AGENT, email.trim()),
            None => USER_AGENT.to_string(),
        };
        Self {
            client: Client::new(),
            base_url: NOMINATIM_URL.to_string(),
            user_agent,
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Resolves `query` to the coordinate of the best (first) match.
    pub async fn geocode(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        trace!("GET {} q={:?}", url, query);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Nominatim returned HTTP {} for {:?}", status, query);
            return Err(GeocodeError::Status(status));
        }

        let body = response.text().await?;
        debug!("Received Nominatim response ({} bytes)", body.len());
        let coord = parse_first_place(&body, query)?;
        info!("Resolved {:?} to {}", query, coord);
        Ok(coord)
    }
}

fn parse_first_place(body: &str, query: &str) -> Result<Coordinate, GeocodeError> {
    let places: Vec<Place> = serde_json::from_str(body)?;
    let place = places
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::NotFound(query.to_string()))?;

    let invalid = |reason: String| GeocodeError::InvalidCoordinate {
        query: query.to_string(),
        reason,
    };
    let lat = place
        .lat
        .parse::<f64>()
        .map_err(|e| invalid(format!("lat {:?}: {}", place.lat, e)))?;
    let lon = place
        .lon
        .parse::<f64>()
        .map_err(|e| invalid(format!("lon {:?}: {}", place.lon, e)))?;

    Coordinate::new(lat, lon).map_err(|e: CoordinateError| invalid(e.to_string()))
}

// Nominatim reports coordinates as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}
