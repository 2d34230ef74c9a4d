use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, trace};

use super::SegmentDistanceProvider;
use crate::config::constant::{GOOGLE_DISTANCE_MATRIX_URL, TRAVEL_MODE};
use crate::distance::error::{DistanceError, TransportError};
use crate::domain::Coordinate;

const STATUS_OK: &str = "OK";

/// Google Distance Matrix client that asks for a single origin/destination
/// pair per request.
pub struct GoogleDistanceMatrix {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GoogleDistanceMatrix {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: GOOGLE_DISTANCE_MATRIX_URL.to_string(),
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Points the client at another endpoint serving the same JSON API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

}

impl SegmentDistanceProvider for GoogleDistanceMatrix {
    async fn query_segment_distance(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<f64, DistanceError> {
        let origins = origin.to_string();
        let destinations = destination.to_string();
        trace!(
            "GET {} origins={} destinations={} mode={}",
            self.base_url,
            origins,
            destinations,
            TRAVEL_MODE
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("origins", origins.as_str()),
                ("destinations", destinations.as_str()),
                ("mode", TRAVEL_MODE),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(
                "Distance matrix returned HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            );
            return Err(TransportError::Status(status).into());
        }

        let body = response.text().await?;
        debug!("Received distance matrix response ({} bytes)", body.len());
        parse_segment_distance(&body, origin, destination)
    }
}

/// Extracts the single-element distance (km) from a Distance Matrix body.
pub(crate) fn parse_segment_distance(
    body: &str,
    origin: Coordinate,
    destination: Coordinate,
) -> Result<f64, DistanceError> {
    let response: DistanceMatrixResponse = serde_json::from_str(body)?;

    if response.status != STATUS_OK {
        return Err(DistanceError::Provider {
            status: response.status,
            message: response.error_message,
        });
    }

    let no_data = |reason: &str| DistanceError::NoData {
        origin,
        destination,
        reason: reason.to_string(),
    };

    let element = response
        .rows
        .into_iter()
        .next()
        .ok_or_else(|| no_data("response has no rows"))?
        .elements
        .into_iter()
        .next()
        .ok_or_else(|| no_data("row has no elements"))?;

    if element.status != STATUS_OK {
        return Err(no_data(&format!("element status {}", element.status)));
    }

    let distance = element
        .distance
        .ok_or_else(|| no_data("element has no distance"))?;
    if !distance.value.is_finite() || distance.value < 0.0 {
        return Err(no_data(&format!("negative distance {}", distance.value)));
    }

    // meters -> km
    Ok(distance.value / 1000.0)
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<Row>,
}

#[derive(Debug, Deserialize)]
struct Row {
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
struct Element {
    #[serde(default)]
    status: String,
    distance: Option<Distance>,
}

#[derive(Debug, Deserialize)]
struct Distance {
    value: f64, // meters
}
