use crate::domain::model::{AnalyzeRequest, ImageUpload, PredictionResponse};
use crate::domain::view::AnalysisView;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Small key/value persistence for session state (token, pending outfit).
pub trait Storage: Send + Sync {
    fn read_file(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn geocoder_url(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn storage_dir(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}

/// The two backend calls the prediction flow is built from.
#[async_trait]
pub trait OutfitBackend: Send + Sync {
    async fn predict_outfit(&self, image: &ImageUpload) -> Result<PredictionResponse>;
    async fn analyze_outfit(&self, request: &AnalyzeRequest) -> Result<AnalysisView>;
}
