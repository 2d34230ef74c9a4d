use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::Coordinate;

/// Failures talking to the provider over HTTP.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned HTTP {0}")]
    Status(StatusCode),

    #[error("could not decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Why a segment distance could not be obtained. Every variant is fatal for
/// the aggregation that hit it.
#[derive(Debug, Error)]
pub enum DistanceError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("provider rejected request with status {status}{}", message_suffix(.message))]
    Provider {
        status: String,
        message: Option<String>,
    },

    #[error("no distance for segment {origin} -> {destination}: {reason}")]
    NoData {
        origin: Coordinate,
        destination: Coordinate,
        reason: String,
    },
}

impl From<reqwest::Error> for DistanceError {
    fn from(err: reqwest::Error) -> Self {
        DistanceError::Transport(TransportError::Request(err))
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl From<serde_json::Error> for DistanceError {
    fn from(err: serde_json::Error) -> Self {
        DistanceError::Transport(TransportError::Decode(err))
    }
}
