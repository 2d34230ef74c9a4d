use std::env;

use dotenv::dotenv;
use thiserror::Error;
use tracing::{info, warn};

pub mod constant {
    pub const GOOGLE_DISTANCE_MATRIX_URL: &str =
        "https://maps.googleapis.com/maps/api/distancematrix/json";
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
    pub const TRAVEL_MODE: &str = "driving";
    pub const USER_AGENT: &str = "route-distance/0.1";
    pub const DEFAULT_DEADLINE_SECS: u64 = 60;

    pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";
    pub const DISTANCE_MATRIX_URL_VAR: &str = "DISTANCE_MATRIX_URL";
    pub const NOMINATIM_URL_VAR: &str = "NOMINATIM_URL";
    pub const NOMINATIM_EMAIL_VAR: &str = "NOMINATIM_EMAIL";
}

use constant::*;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} is not set (environment or .env)")]
    Missing(&'static str),
}

/// Runtime settings read from the environment.
#[derive(Clone, PartialEq)]
pub struct Settings {
    pub google_api_key: String,
    pub distance_matrix_url: String,
    pub nominatim_url: String,
    pub nominatim_email: Option<String>,
}

impl Settings {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let google_api_key =
            non_empty(GOOGLE_API_KEY_VAR).ok_or(ConfigError::Missing(GOOGLE_API_KEY_VAR))?;
        info!("Loaded Google Maps API key from environment");

        let distance_matrix_url = non_empty(DISTANCE_MATRIX_URL_VAR)
            .unwrap_or_else(|| GOOGLE_DISTANCE_MATRIX_URL.to_string());
        let nominatim_url =
            non_empty(NOMINATIM_URL_VAR).unwrap_or_else(|| NOMINATIM_URL.to_string());
        let nominatim_email = non_empty(NOMINATIM_EMAIL_VAR);
        if nominatim_email.is_none() {
            warn!(
                "{} not set, place lookups go out without a contact address",
                NOMINATIM_EMAIL_VAR
            );
        }

        Ok(Self {
            google_api_key,
            distance_matrix_url,
            nominatim_url,
            nominatim_email,
        })
    }
}

// Keeps the API key out of logs.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("google_api_key", &"<redacted>")
            .field("distance_matrix_url", &self.distance_matrix_url)
            .field("nominatim_url", &self.nominatim_url)
            .field("nominatim_email", &self.nominatim_email)
            .finish()
    }
}
