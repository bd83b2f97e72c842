use crate::core::analysis::{outfit_score, prediction_only};
use crate::domain::model::{AnalyzeRequest, NewOutfit, Occasion, PredictionResponse, RecordId};
use crate::domain::ports::OutfitBackend;
use crate::domain::view::AnalysisView;
use crate::utils::error::{AppError, Result};

/// Prediction first (it owns the image id), then the weather analysis.
/// A failed analysis degrades to a prediction-only result.
pub struct PredictFlow<'a, B: OutfitBackend> {
    backend: &'a B,
}

impl<'a, B: OutfitBackend> PredictFlow<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub async fn run(&self, request: &AnalyzeRequest) -> Result<AnalysisView> {
        let prediction = match self.backend.predict_outfit(&request.image).await {
            Ok(prediction) => prediction,
            Err(AppError::Unauthorized) => return Err(AppError::Unauthorized),
            Err(e) => {
                tracing::error!("Prediction/upload failed: {}", e);
                return Err(AppError::PredictionError {
                    message: "Failed to upload image for prediction.".to_string(),
                });
            }
        };

        if prediction.id.as_ref().map_or(true, RecordId::is_blank) {
            return Err(AppError::PredictionError {
                message: "Prediction success but no ID returned from backend.".to_string(),
            });
        }
        tracing::debug!(
            "Prediction {:?}: {:?}",
            prediction.id,
            prediction.predicted_class
        );

        let analysis = match self.backend.analyze_outfit(request).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!("Analysis partial failure: {}", e);
                prediction_only(&prediction)
            }
        };

        Ok(merge(analysis, prediction))
    }
}

/// The prediction endpoint is authoritative for image, id, class and score.
pub fn merge(mut analysis: AnalysisView, prediction: PredictionResponse) -> AnalysisView {
    analysis.image_url = prediction.image_url.or(analysis.image_url);
    analysis.image_id = prediction.id;
    analysis.outfit_type = prediction.predicted_class.or(analysis.outfit_type);

    let predicted_score = prediction.confidence.map(outfit_score).unwrap_or(0);
    if predicted_score > 0 {
        analysis.outfit_score = predicted_score;
    }
    analysis
}

/// Wardrobe record for an analysed outfit; `None` until the image is hosted.
pub fn wardrobe_record(view: &AnalysisView, occasion: Occasion) -> Option<NewOutfit> {
    let image_url = view.image_url.clone().filter(|url| !url.is_empty())?;
    Some(NewOutfit {
        image_url,
        category: view
            .outfit_type
            .clone()
            .unwrap_or_else(|| "unknown".to_string()),
        color: "Unknown".to_string(),
        occasion: occasion.as_str().to_string(),
        notes: "Saved from outfit analysis".to_string(),
        confidence: f64::from(view.outfit_score) / 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::build_analysis;
    use crate::domain::model::{
        ImageUpload, OutfitWeatherResponse, RecordId, TravelPackResponse,
    };
    use async_trait::async_trait;

    struct MockBackend {
        prediction: Option<PredictionResponse>,
        unauthorized: bool,
        analysis: Option<AnalysisView>,
    }

    #[async_trait]
    impl OutfitBackend for MockBackend {
        async fn predict_outfit(&self, _image: &ImageUpload) -> Result<PredictionResponse> {
            if self.unauthorized {
                return Err(AppError::Unauthorized);
            }
            self.prediction.clone().ok_or(AppError::ApiError {
                status: 500,
                message: "model offline".to_string(),
            })
        }

        async fn analyze_outfit(&self, _request: &AnalyzeRequest) -> Result<AnalysisView> {
            self.analysis.clone().ok_or(AppError::ApiError {
                status: 503,
                message: "weather down".to_string(),
            })
        }
    }

    fn request() -> AnalyzeRequest {
        AnalyzeRequest {
            image: ImageUpload::new("look.jpg", vec![0xff, 0xd8]),
            city: "Mumbai".to_string(),
            occasion: Some(Occasion::Office),
            material: None,
        }
    }

    fn prediction() -> PredictionResponse {
        PredictionResponse {
            id: Some(RecordId::Int(77)),
            predicted_class: Some("kurti".to_string()),
            confidence: Some(0.91),
            image_url: Some("https://img.example/77.jpg".to_string()),
        }
    }

    fn analysis() -> AnalysisView {
        let resp = OutfitWeatherResponse {
            outfit_type: Some("shirt".to_string()),
            confidence: Some(0.4),
            temperature: Some(33.0),
            rain_probability: Some(5.0),
            ..Default::default()
        };
        build_analysis(&resp, &TravelPackResponse::default())
    }

    #[tokio::test]
    async fn test_prediction_overrides_analysis() {
        let backend = MockBackend {
            prediction: Some(prediction()),
            unauthorized: false,
            analysis: Some(analysis()),
        };

        let view = PredictFlow::new(&backend).run(&request()).await.unwrap();

        assert_eq!(view.image_id, Some(RecordId::Int(77)));
        assert_eq!(view.outfit_type.as_deref(), Some("kurti"));
        assert_eq!(view.outfit_score, 91);
        assert_eq!(view.image_url.as_deref(), Some("https://img.example/77.jpg"));
        assert_eq!(view.weather.temp, Some(33.0));
    }

    #[tokio::test]
    async fn test_analysis_failure_falls_back_to_prediction() {
        let backend = MockBackend {
            prediction: Some(prediction()),
            unauthorized: false,
            analysis: None,
        };

        let view = PredictFlow::new(&backend).run(&request()).await.unwrap();

        assert_eq!(view.verdict, "Weather data unavailable");
        assert_eq!(view.weather.condition, "Unknown");
        assert_eq!(view.image_id, Some(RecordId::Int(77)));
    }

    #[tokio::test]
    async fn test_missing_prediction_id_is_an_error() {
        let backend = MockBackend {
            prediction: Some(PredictionResponse {
                id: None,
                ..prediction()
            }),
            unauthorized: false,
            analysis: Some(analysis()),
        };

        let err = PredictFlow::new(&backend).run(&request()).await.unwrap_err();
        assert_eq!(
            err.user_friendly_message(),
            "Prediction success but no ID returned from backend."
        );
    }

    #[tokio::test]
    async fn test_empty_prediction_id_is_an_error() {
        let backend = MockBackend {
            prediction: Some(PredictionResponse {
                id: Some(RecordId::Text(String::new())),
                ..prediction()
            }),
            unauthorized: false,
            analysis: Some(analysis()),
        };

        let err = PredictFlow::new(&backend).run(&request()).await.unwrap_err();
        assert!(matches!(err, AppError::PredictionError { .. }));
    }

    #[tokio::test]
    async fn test_prediction_errors() {
        let expired = MockBackend {
            prediction: None,
            unauthorized: true,
            analysis: None,
        };
        let err = PredictFlow::new(&expired).run(&request()).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));

        let offline = MockBackend {
            prediction: None,
            unauthorized: false,
            analysis: None,
        };
        let err = PredictFlow::new(&offline).run(&request()).await.unwrap_err();
        assert_eq!(err.user_friendly_message(), "Failed to upload image for prediction.");
    }

    #[test]
    fn test_zero_confidence_keeps_analysis_score() {
        let merged = merge(
            analysis(),
            PredictionResponse {
                confidence: Some(0.0),
                ..prediction()
            },
        );
        assert_eq!(merged.outfit_score, 40);
    }

    #[test]
    fn test_wardrobe_record_requires_image() {
        let mut view = merge(analysis(), prediction());
        let record = wardrobe_record(&view, Occasion::Party).unwrap();
        assert_eq!(record.category, "kurti");
        assert_eq!(record.occasion, "Party");
        assert!((record.confidence - 0.91).abs() < 1e-9);

        view.image_url = None;
        assert!(wardrobe_record(&view, Occasion::Party).is_none());
    }
}
