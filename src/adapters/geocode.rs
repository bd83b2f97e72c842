use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::validate_coordinates;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReverseResponse {
    address: Address,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state_district: Option<String>,
}

impl Address {
    fn locality(self) -> Option<String> {
        [self.city, self.town, self.village, self.state_district]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty())
    }
}

/// Coordinates to city name via Nominatim reverse geocoding.
pub struct GeoLocator {
    client: Client,
    endpoint: String,
}

impl GeoLocator {
    pub fn new(endpoint: &str, timeout_seconds: u64, user_agent: &str) -> Result<Self> {
        // Nominatim rejects requests without an identifying user agent.
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.geocoder_url(),
            config.timeout_seconds(),
            config.user_agent(),
        )
    }

    pub async fn reverse(&self, lat: f64, lon: f64) -> Result<String> {
        validate_coordinates(lat, lon)?;

        let url = format!("{}/reverse", self.endpoint);
        tracing::debug!("Reverse geocoding {}, {} via {}", lat, lon, url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: ReverseResponse = response.json().await?;
        let city = body
            .address
            .locality()
            .ok_or(AppError::LocationNotFound { lat, lon })?;

        tracing::info!("Detected city: {}", city);
        Ok(city)
    }
}
