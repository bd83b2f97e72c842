use crate::domain::model::RecordId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BandColor {
    Green,
    Yellow,
    Orange,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    VeryConfident,
    Confident,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceBand::VeryConfident => "Very Confident",
            ConfidenceBand::Confident => "Confident",
            ConfidenceBand::Medium => "Medium Confidence",
            ConfidenceBand::Low => "Low Confidence",
        }
    }

    pub fn color(&self) -> BandColor {
        match self {
            ConfidenceBand::VeryConfident => BandColor::Green,
            ConfidenceBand::Confident => BandColor::Yellow,
            ConfidenceBand::Medium => BandColor::Orange,
            ConfidenceBand::Low => BandColor::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictColor {
    Green,
    Red,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FabricTip {
    pub title: String,
    pub tip: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessoryIcon {
    Glasses,
    Watch,
    Footwear,
    Bag,
    Umbrella,
    Sun,
    Garment,
}

impl AccessoryIcon {
    pub fn lookup(name: &str) -> Option<Self> {
        let icon = match name {
            "Glasses" | "Sunglasses" => AccessoryIcon::Glasses,
            "Watch" | "Smart Watch" => AccessoryIcon::Watch,
            "Footprints" | "Shoes" | "Boots" => AccessoryIcon::Footwear,
            "Bag" | "Handbag" => AccessoryIcon::Bag,
            "Umbrella" => AccessoryIcon::Umbrella,
            "Sun" => AccessoryIcon::Sun,
            "Scarf" => AccessoryIcon::Garment,
            _ => return None,
        };
        Some(icon)
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            AccessoryIcon::Glasses => "🕶",
            AccessoryIcon::Watch => "⌚",
            AccessoryIcon::Footwear => "👟",
            AccessoryIcon::Bag => "👜",
            AccessoryIcon::Umbrella => "☂",
            AccessoryIcon::Sun => "☀",
            AccessoryIcon::Garment => "👕",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accessory {
    pub name: String,
    pub icon: AccessoryIcon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackingItem {
    pub item: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    /// `None` when the weather service was unavailable.
    pub temp: Option<f64>,
    pub condition: String,
    pub is_rainy: bool,
    pub breakdown: Vec<String>,
}

/// Everything the result screen shows for one analysed outfit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisView {
    pub outfit_included: bool,
    pub outfit_type: Option<String>,
    pub outfit_score: u32,
    pub confidence: ConfidenceBand,
    pub reasons: Vec<String>,
    pub fabric_tip: Option<FabricTip>,
    pub weather: WeatherView,
    pub verdict: String,
    pub verdict_color: VerdictColor,
    pub suggestions: Vec<String>,
    pub accessories: Vec<Accessory>,
    pub packing_list: Vec<PackingItem>,
    pub image_url: Option<String>,
    pub image_id: Option<RecordId>,
}
