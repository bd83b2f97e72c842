//! Reshapes raw backend payloads into the view the result screen renders.
//!
//! Everything here is pure: no I/O, no clock. Missing backend fields never
//! fail; they fall back to the defaults the result screen expects.

use crate::domain::model::{OutfitWeatherResponse, PredictionResponse, TravelPackResponse};
use crate::domain::view::{
    Accessory, AccessoryIcon, AnalysisView, ConfidenceBand, FabricTip, PackingItem,
    VerdictColor, WeatherView,
};

const RAINY_THRESHOLD: f64 = 50.0;
const DRY_THRESHOLD: f64 = 20.0;
const DEFAULT_FABRIC_TIP: &str = "Choose natural fibers for comfort in this weather.";

/// Fabric advice keyed by lower-cased outfit type.
const FABRIC_RULES: &[(&str, &str, &str)] = &[
    (
        "saree",
        "Saree Fabric Insight",
        "Cotton is best for >25°C. Silk is great for cool evenings.",
    ),
    (
        "kurti",
        "Kurti Fabric Insight",
        "Breathable cotton blends recommended for daily wear.",
    ),
    (
        "shirt",
        "Shirt Fabric Insight",
        "Linen is breathable for summer; Oxford cloth for cooler days.",
    ),
    (
        "t-shirt",
        "T-Shirt Insight",
        "100% Cotton offers best breathability.",
    ),
    (
        "jacket",
        "Layering Insight",
        "Ensure insulation layers are breathable.",
    ),
];

pub fn confidence_band(confidence: f64) -> ConfidenceBand {
    if confidence > 0.75 {
        ConfidenceBand::VeryConfident
    } else if confidence > 0.5 {
        ConfidenceBand::Confident
    } else if confidence > 0.3 {
        ConfidenceBand::Medium
    } else {
        ConfidenceBand::Low
    }
}

pub fn outfit_score(confidence: f64) -> u32 {
    (confidence * 100.0).round().max(0.0) as u32
}

/// Renders an optional reading the way the result screen prints it.
pub fn format_reading(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "--".to_string(),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn is_rainy(resp: &OutfitWeatherResponse) -> bool {
    resp.rain_probability.is_some_and(|p| p > RAINY_THRESHOLD)
}

/// Human-readable reasons behind the verdict.
pub fn explain(resp: &OutfitWeatherResponse) -> Vec<String> {
    let mut reasons: Vec<String> = [
        &resp.outfit_verdict,
        &resp.material_verdict,
        &resp.material_reason,
    ]
    .into_iter()
    .filter_map(non_empty)
    .map(str::to_string)
    .collect();

    if reasons.is_empty() {
        if let Some(t) = resp.temperature.filter(|t| *t != 0.0) {
            reasons.push(format!("Temperature is {}°C", t));
        }
        match resp.rain_probability {
            Some(p) if p < DRY_THRESHOLD => reasons.push("No rain expected".to_string()),
            Some(p) if p > RAINY_THRESHOLD => {
                reasons.push("Rain expected - waterproofs needed".to_string())
            }
            _ => {}
        }
    }

    reasons
}

pub fn fabric_tip(resp: &OutfitWeatherResponse) -> Option<FabricTip> {
    if let Some(verdict) = non_empty(&resp.material_verdict) {
        let material = non_empty(&resp.material).unwrap_or("Selected Fabric");
        return Some(FabricTip {
            title: format!("Material Insight: {}", material),
            tip: verdict.to_string(),
        });
    }

    let outfit_type = non_empty(&resp.outfit_type)?;
    let key = outfit_type.to_lowercase();

    let tip = match FABRIC_RULES.iter().find(|(name, _, _)| *name == key) {
        Some((_, title, tip)) => FabricTip {
            title: title.to_string(),
            tip: tip.to_string(),
        },
        None => FabricTip {
            title: format!("{} Insight", outfit_type),
            tip: DEFAULT_FABRIC_TIP.to_string(),
        },
    };
    Some(tip)
}

pub fn weather_view(resp: &OutfitWeatherResponse) -> WeatherView {
    let rainy = is_rainy(resp);

    let breakdown = match &resp.weather_breakdown {
        Some(lines) if !lines.is_empty() => lines.clone(),
        _ => {
            let humidity = resp
                .humidity
                .as_ref()
                .filter(|h| !h.is_blank())
                .map(|h| h.to_string())
                .unwrap_or_else(|| "Normal".to_string());
            vec![
                format!("Temperature: {}°C", format_reading(resp.temperature)),
                if rainy {
                    "Rainy Conditions".to_string()
                } else {
                    "No Rain Expected".to_string()
                },
                format!("Humidity: {}", humidity),
            ]
        }
    };

    WeatherView {
        temp: resp.temperature,
        condition: if rainy { "Rainy" } else { "Clear" }.to_string(),
        is_rainy: rainy,
        breakdown,
    }
}

pub fn verdict(resp: &OutfitWeatherResponse) -> (String, VerdictColor) {
    let text = non_empty(&resp.final_verdict)
        .or(non_empty(&resp.verdict))
        .unwrap_or("Analysis Complete")
        .to_string();

    let approved = resp
        .final_verdict
        .as_deref()
        .is_some_and(|v| v.starts_with('✅'));
    let color = if approved || resp.confidence.unwrap_or(0.0) > 0.5 {
        VerdictColor::Green
    } else {
        VerdictColor::Red
    };

    (text, color)
}

/// Drops placeholder alternatives the model emits when it has nothing to say.
pub fn filter_suggestions(alternatives: &[Option<String>]) -> Vec<String> {
    alternatives
        .iter()
        .flatten()
        .filter(|s| {
            let lower = s.to_lowercase();
            !s.is_empty() && !lower.contains("not recommended") && !lower.contains("null")
        })
        .cloned()
        .collect()
}

pub fn accessories(names: &[String]) -> Vec<Accessory> {
    names
        .iter()
        .map(|name| Accessory {
            name: name.clone(),
            icon: AccessoryIcon::lookup(name).unwrap_or(AccessoryIcon::Garment),
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Weather tips, then travel essentials, then the structured travel-pack
/// categories in backend order, then the flat travel-pack list.
pub fn packing_list(resp: &OutfitWeatherResponse, travel: &TravelPackResponse) -> Vec<PackingItem> {
    let mut items = Vec::new();

    let rain_prob = resp.rain_probability.unwrap_or(0.0);
    for advice in resp.rain_advice.iter().flatten() {
        items.push(PackingItem {
            item: "Weather Tip".to_string(),
            reason: format!("{} (Rain prob: {}%)", advice, rain_prob),
        });
    }

    for essential in resp.travel_essentials.iter().flatten() {
        items.push(PackingItem {
            item: essential.clone(),
            reason: "Travel Essential".to_string(),
        });
    }

    if let Some(recommendation) = &travel.packing_recommendation {
        for (category, value) in recommendation {
            let reason = capitalize(category);
            let entries = value.as_array().into_iter().flatten();
            for entry in entries.filter_map(|v| v.as_str()) {
                items.push(PackingItem {
                    item: entry.to_string(),
                    reason: reason.clone(),
                });
            }
        }
    }

    let city = travel.city.as_deref().unwrap_or("your trip");
    for clothes in travel.suggested_clothes.iter().flatten() {
        items.push(PackingItem {
            item: clothes.clone(),
            reason: format!(
                "Recommended for {}: {}°C",
                city,
                format_reading(travel.temperature)
            ),
        });
    }

    items
}

pub fn build_analysis(resp: &OutfitWeatherResponse, travel: &TravelPackResponse) -> AnalysisView {
    let confidence = resp.confidence.unwrap_or(0.0);
    let (verdict, verdict_color) = verdict(resp);

    AnalysisView {
        outfit_included: true,
        outfit_type: resp.outfit_type.clone(),
        outfit_score: outfit_score(confidence),
        confidence: confidence_band(confidence),
        reasons: explain(resp),
        fabric_tip: fabric_tip(resp),
        weather: weather_view(resp),
        verdict,
        verdict_color,
        suggestions: filter_suggestions(resp.suggested_alternatives.as_deref().unwrap_or_default()),
        accessories: accessories(resp.accessories.as_deref().unwrap_or_default()),
        packing_list: packing_list(resp, travel),
        image_url: None,
        image_id: None,
    }
}

/// Minimal result used when the weather analysis is down but the
/// prediction itself succeeded.
pub fn prediction_only(prediction: &PredictionResponse) -> AnalysisView {
    let confidence = prediction.confidence.unwrap_or(0.0);
    AnalysisView {
        outfit_included: true,
        outfit_type: prediction.predicted_class.clone(),
        outfit_score: outfit_score(confidence),
        confidence: confidence_band(confidence),
        reasons: Vec::new(),
        fabric_tip: None,
        weather: WeatherView {
            temp: None,
            condition: "Unknown".to_string(),
            is_rainy: false,
            breakdown: Vec::new(),
        },
        verdict: "Weather data unavailable".to_string(),
        verdict_color: VerdictColor::Red,
        suggestions: Vec::new(),
        accessories: Vec::new(),
        packing_list: Vec::new(),
        image_url: None,
        image_id: None,
    }
}
