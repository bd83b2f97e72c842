use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Backend record ids come back as integers from some endpoints and as
/// strings from others.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

impl RecordId {
    /// `0` and `""` are not usable ids.
    pub fn is_blank(&self) -> bool {
        match self {
            RecordId::Int(id) => *id == 0,
            RecordId::Text(id) => id.trim().is_empty(),
        }
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        match value.parse::<i64>() {
            Ok(id) => RecordId::Int(id),
            Err(_) => RecordId::Text(value.to_string()),
        }
    }
}

/// A reading that the backend sends either as a number or as free text
/// (humidity is "65" on some days and "High" on others).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Number(f64),
    Text(String),
}

impl Reading {
    pub fn is_blank(&self) -> bool {
        match self {
            Reading::Number(n) => *n == 0.0,
            Reading::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Number(n) => write!(f, "{}", n),
            Reading::Text(s) => f.write_str(s),
        }
    }
}

/// Payload of `POST /outfit-weather`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutfitWeatherResponse {
    pub outfit_type: Option<String>,
    pub confidence: Option<f64>,
    pub temperature: Option<f64>,
    pub rain_probability: Option<f64>,
    pub humidity: Option<Reading>,
    pub outfit_verdict: Option<String>,
    pub material: Option<String>,
    pub material_verdict: Option<String>,
    pub material_reason: Option<String>,
    pub weather_breakdown: Option<Vec<String>>,
    pub final_verdict: Option<String>,
    pub verdict: Option<String>,
    pub suggested_alternatives: Option<Vec<Option<String>>>,
    pub accessories: Option<Vec<String>>,
    pub rain_advice: Option<Vec<String>>,
    pub travel_essentials: Option<Vec<String>>,
}

/// Payload of `GET /travel-pack`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelPackResponse {
    pub city: Option<String>,
    pub temperature: Option<f64>,
    pub suggested_clothes: Option<Vec<String>>,
    /// Category name to items, in the order the backend sent them.
    pub packing_recommendation: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Payload of `POST /predict-outfit`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionResponse {
    pub id: Option<RecordId>,
    pub predicted_class: Option<String>,
    pub confidence: Option<f64>,
    pub image_url: Option<String>,
}

/// Verification of a prediction, sent to `POST /feedback`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub image_id: RecordId,
    pub predicted_class: Option<String>,
    pub correct_class: Option<String>,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardrobeOutfit {
    pub id: RecordId,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub last_worn: Option<String>,
    #[serde(default)]
    pub wear_count: Option<u32>,
    #[serde(default)]
    pub worn_history: Option<Vec<String>>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub occasion: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl WardrobeOutfit {
    pub fn display_type(&self) -> &str {
        self.kind
            .as_deref()
            .or(self.category.as_deref())
            .unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WardrobeStats {
    #[serde(default)]
    pub total_items: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Metadata record persisted by `POST /wardrobe/save`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOutfit {
    pub image_url: String,
    pub category: String,
    pub color: String,
    pub occasion: String,
    pub notes: String,
    pub confidence: f64,
}

impl NewOutfit {
    pub fn uploaded(image_url: String, category: &str) -> Self {
        Self {
            image_url,
            category: category.to_string(),
            color: "Unknown".to_string(),
            occasion: Occasion::Casual.as_str().to_string(),
            notes: "Uploaded via Wardrobe".to_string(),
            confidence: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UploadResponse {
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SavedOutfitResponse {
    pub outfit: Option<SavedOutfitRef>,
    pub id: Option<RecordId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SavedOutfitRef {
    pub id: Option<RecordId>,
}

impl SavedOutfitResponse {
    pub fn saved_id(self) -> Option<RecordId> {
        self.outfit.and_then(|o| o.id).or(self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Occasion {
    #[default]
    Casual,
    Office,
    Party,
    Travel,
}

impl Occasion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Occasion::Casual => "Casual",
            Occasion::Office => "Office",
            Occasion::Party => "Party",
            Occasion::Travel => "Travel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Cotton,
    Silk,
    Polyester,
    Wool,
    Linen,
    Denim,
    Blend,
}

impl Material {
    pub fn as_str(&self) -> &'static str {
        match self {
            Material::Cotton => "cotton",
            Material::Silk => "silk",
            Material::Polyester => "polyester",
            Material::Wool => "wool",
            Material::Linen => "linen",
            Material::Denim => "denim",
            Material::Blend => "blend",
        }
    }
}

/// Clothing categories the wardrobe accepts on upload.
pub const WARDROBE_CATEGORIES: &[&str] = &[
    "shirt",
    "t-shirt",
    "pants",
    "jeans",
    "dress",
    "jacket",
    "shoes",
    "shorts",
    "skirt",
    "sweater",
    "hoodie",
    "coat",
    "blazer",
    "traditional",
    "accessories",
];

pub const DEFAULT_CATEGORY: &str = "t-shirt";

/// Image bytes plus the metadata a multipart part needs.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_for(&file_name);
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    pub async fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("outfit.jpg")
            .to_string();
        Ok(Self::new(file_name, bytes))
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

/// Input of the outfit analysis call.
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub image: ImageUpload,
    pub city: String,
    pub occasion: Option<Occasion>,
    pub material: Option<Material>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_blank() {
        assert!(RecordId::Int(0).is_blank());
        assert!(RecordId::Text(String::new()).is_blank());
        assert!(!RecordId::Int(12).is_blank());
        assert!(!RecordId::Text("img-1".to_string()).is_blank());
    }

    #[test]
    fn test_record_id_accepts_both_shapes() {
        let int: RecordId = serde_json::from_str("42").unwrap();
        let text: RecordId = serde_json::from_str("\"665f1c\"").unwrap();
        assert_eq!(int, RecordId::Int(42));
        assert_eq!(text.to_string(), "665f1c");
        assert_eq!(RecordId::from("7"), RecordId::Int(7));
    }

    #[test]
    fn test_outfit_weather_response_tolerates_nulls() {
        let resp: OutfitWeatherResponse = serde_json::from_value(serde_json::json!({
            "outfit_type": "Saree",
            "confidence": null,
            "humidity": "High",
            "suggested_alternatives": ["Kurti", null],
            "unexpected": {"nested": true}
        }))
        .unwrap();

        assert_eq!(resp.outfit_type.as_deref(), Some("Saree"));
        assert!(resp.confidence.is_none());
        assert_eq!(resp.humidity, Some(Reading::Text("High".to_string())));
        assert_eq!(resp.suggested_alternatives.unwrap().len(), 2);
    }

    #[test]
    fn test_saved_outfit_id_prefers_nested() {
        let nested: SavedOutfitResponse =
            serde_json::from_value(serde_json::json!({"outfit": {"id": 9}, "id": 1})).unwrap();
        assert_eq!(nested.saved_id(), Some(RecordId::Int(9)));

        let flat: SavedOutfitResponse = serde_json::from_value(serde_json::json!({"id": "abc"})).unwrap();
        assert_eq!(flat.saved_id(), Some(RecordId::Text("abc".to_string())));
    }

    #[test]
    fn test_wardrobe_outfit_display_type() {
        let outfit: WardrobeOutfit = serde_json::from_value(serde_json::json!({
            "id": 3,
            "category": "jacket"
        }))
        .unwrap();
        assert_eq!(outfit.display_type(), "jacket");
    }

    #[test]
    fn test_image_upload_mime() {
        assert_eq!(ImageUpload::new("a.PNG", vec![]).mime_type, "image/png");
        assert_eq!(ImageUpload::new("a.jpeg", vec![]).mime_type, "image/jpeg");
    }
}
