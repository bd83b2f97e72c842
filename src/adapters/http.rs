//! Typed client for the outfit-weather backend.
//!
//! One method per REST endpoint. Non-2xx responses are turned into
//! [`AppError::ApiError`] carrying the backend's `detail` message, except
//! 401 which becomes [`AppError::Unauthorized`].

use crate::core::analysis::build_analysis;
use crate::domain::model::{
    AnalyzeRequest, AuthToken, Feedback, ImageUpload, NewOutfit, OutfitWeatherResponse,
    PredictionResponse, RecordId, SavedOutfitResponse, TravelPackResponse, UploadResponse,
    WardrobeOutfit, WardrobeStats,
};
use crate::domain::ports::{ConfigProvider, OutfitBackend};
use crate::domain::view::AnalysisView;
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://outfit-weather-backend.onrender.com";

const OUTFIT_WEATHER_PATH: &str = "/outfit-weather";
const TRAVEL_PACK_PATH: &str = "/travel-pack";
const PREDICT_PATH: &str = "/predict-outfit";
const FEEDBACK_PATH: &str = "/feedback";
const LOGIN_PATH: &str = "/auth/login";
const SIGNUP_PATH: &str = "/auth/signup";
const WARDROBE_PATH: &str = "/wardrobe";
const METRICS_PATH: &str = "/metrics";

#[derive(Deserialize)]
#[serde(untagged)]
enum WardrobeListing {
    Items(Vec<serde_json::Value>),
    Wrapped { outfits: Vec<serde_json::Value> },
    Other(serde_json::Value),
}

/// Keeps every record that decodes; a malformed one is logged and skipped.
fn decode_outfits(records: Vec<serde_json::Value>) -> Vec<WardrobeOutfit> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value(record.clone()) {
            Ok(outfit) => Some(outfit),
            Err(e) => {
                tracing::warn!("Skipping malformed wardrobe record {}: {}", record, e);
                None
            }
        })
        .collect()
}

pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<SecretString>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_seconds: u64, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.api_base_url(),
            config.timeout_seconds(),
            config.user_agent(),
        )
    }

    /// Attach (or clear) the bearer token sent with every request.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.map(SecretString::from);
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token.map(SecretString::from);
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status.is_success() {
            let body = response.bytes().await?;
            // Some endpoints answer 200 with an empty body.
            if body.is_empty() {
                return Ok(serde_json::from_slice(b"null")?);
            }
            return Ok(serde_json::from_slice(&body)?);
        }

        Err(Self::parse_error(response).await)
    }

    async fn expect_success(response: reqwest::Response) -> Result<()> {
        if response.status().is_success() {
            return Ok(());
        }
        Err(Self::parse_error(response).await)
    }

    async fn parse_error(response: reqwest::Response) -> AppError {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return AppError::Unauthorized;
        }

        let fallback = status
            .canonical_reason()
            .unwrap_or("Unexpected response")
            .to_string();
        let message = match response.json::<serde_json::Value>().await {
            Ok(body) => match body.get("detail") {
                Some(serde_json::Value::String(detail)) => detail.clone(),
                Some(detail) => detail.to_string(),
                None => fallback,
            },
            Err(_) => fallback,
        };

        AppError::ApiError {
            status: status.as_u16(),
            message,
        }
    }

    fn image_part(image: &ImageUpload) -> Result<Part> {
        Ok(Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(image.mime_type)?)
    }

    pub async fn outfit_weather(&self, request: &AnalyzeRequest) -> Result<OutfitWeatherResponse> {
        let mut form = Form::new()
            .part("file", Self::image_part(&request.image)?)
            .text("city", request.city.clone());
        if let Some(occasion) = request.occasion {
            form = form.text("occasion", occasion.as_str());
        }

        let mut query = vec![("city", request.city.as_str())];
        if let Some(occasion) = request.occasion {
            query.push(("occasion", occasion.as_str()));
        }
        if let Some(material) = request.material {
            query.push(("material", material.as_str()));
        }

        let response = self
            .request(Method::POST, OUTFIT_WEATHER_PATH)
            .query(&query)
            .multipart(form)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn travel_pack(&self, city: &str) -> Result<TravelPackResponse> {
        let response = self
            .request(Method::GET, TRAVEL_PACK_PATH)
            .query(&[("city", city)])
            .send()
            .await?;
        let pack: Option<TravelPackResponse> = Self::handle_response(response).await?;
        Ok(pack.unwrap_or_default())
    }

    /// Weather verdict and travel pack fetched together. The travel pack is
    /// best-effort: if it fails the analysis still succeeds without it.
    pub async fn analyze_outfit(&self, request: &AnalyzeRequest) -> Result<AnalysisView> {
        tracing::info!("Analyzing outfit for {}", request.city);

        let (weather, travel) = tokio::join!(
            self.outfit_weather(request),
            self.travel_pack(&request.city)
        );

        let weather = weather?;
        let travel = travel.unwrap_or_else(|e| {
            tracing::warn!("Travel pack fetch failed: {}", e);
            TravelPackResponse {
                suggested_clothes: Some(Vec::new()),
                ..Default::default()
            }
        });

        Ok(build_analysis(&weather, &travel))
    }

    pub async fn predict_outfit(&self, image: &ImageUpload) -> Result<PredictionResponse> {
        let form = Form::new().part("file", Self::image_part(image)?);
        let response = self
            .request(Method::POST, PREDICT_PATH)
            .multipart(form)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn submit_feedback(&self, feedback: &Feedback) -> Result<serde_json::Value> {
        let response = self
            .request(Method::POST, FEEDBACK_PATH)
            .json(feedback)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthToken> {
        let response = self
            .request(Method::POST, LOGIN_PATH)
            .form(&[("username", email), ("password", password)])
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<serde_json::Value> {
        let response = self
            .request(Method::POST, SIGNUP_PATH)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn list_outfits(&self) -> Result<Vec<WardrobeOutfit>> {
        let response = self
            .request(Method::GET, &format!("{}/", WARDROBE_PATH))
            .send()
            .await?;
        let listing: WardrobeListing = Self::handle_response(response).await?;

        Ok(match listing {
            WardrobeListing::Items(items) => decode_outfits(items),
            WardrobeListing::Wrapped { outfits } => decode_outfits(outfits),
            WardrobeListing::Other(other) => {
                tracing::warn!("Unexpected wardrobe data format: {}", other);
                Vec::new()
            }
        })
    }

    /// Uploads the image only; returns the hosted image URL.
    pub async fn upload_outfit(&self, image: &ImageUpload, category: &str) -> Result<String> {
        let form = Form::new()
            .part("file", Self::image_part(image)?)
            .text("type", category.to_string());
        let response = self
            .request(Method::POST, &format!("{}/upload", WARDROBE_PATH))
            .multipart(form)
            .send()
            .await?;
        let uploaded: UploadResponse = Self::handle_response(response).await?;

        uploaded
            .image_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::validation("Upload succeeded but no image URL was returned"))
    }

    pub async fn save_outfit(&self, outfit: &NewOutfit) -> Result<Option<RecordId>> {
        let response = self
            .request(Method::POST, &format!("{}/save", WARDROBE_PATH))
            .json(outfit)
            .send()
            .await?;
        let saved: Option<SavedOutfitResponse> = Self::handle_response(response).await?;
        Ok(saved.and_then(SavedOutfitResponse::saved_id))
    }

    pub async fn delete_outfit(&self, id: &RecordId) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("{}/{}", WARDROBE_PATH, id))
            .send()
            .await?;
        Self::expect_success(response).await
    }

    pub async fn wear_outfit(&self, id: &RecordId) -> Result<()> {
        let response = self
            .request(Method::POST, &format!("{}/{}/wear", WARDROBE_PATH, id))
            .send()
            .await?;
        Self::expect_success(response).await
    }

    pub async fn stats(&self) -> Result<WardrobeStats> {
        let response = self
            .request(Method::GET, &format!("{}/stats", WARDROBE_PATH))
            .send()
            .await?;
        let stats: Option<WardrobeStats> = Self::handle_response(response).await?;
        Ok(stats.unwrap_or_default())
    }

    pub async fn outfits_by_date(&self, date: NaiveDate) -> Result<Vec<WardrobeOutfit>> {
        let day = date.format("%Y-%m-%d").to_string();
        let response = self
            .request(Method::GET, &format!("{}/by-date", WARDROBE_PATH))
            .query(&[("date", day.as_str())])
            .send()
            .await?;
        let outfits: Option<Vec<serde_json::Value>> = Self::handle_response(response).await?;
        Ok(decode_outfits(outfits.unwrap_or_default()))
    }

    pub async fn metrics(&self) -> Result<serde_json::Value> {
        let response = self.request(Method::GET, METRICS_PATH).send().await?;
        Self::handle_response(response).await
    }
}

#[async_trait]
impl OutfitBackend for ApiClient {
    async fn predict_outfit(&self, image: &ImageUpload) -> Result<PredictionResponse> {
        ApiClient::predict_outfit(self, image).await
    }

    async fn analyze_outfit(&self, request: &AnalyzeRequest) -> Result<AnalysisView> {
        ApiClient::analyze_outfit(self, request).await
    }
}
