//! Plain-text rendering of results for the terminal.

use crate::core::analysis::format_reading;
use crate::core::wardrobe::{is_worn_recently, MonthView};
use crate::domain::model::{TravelPackResponse, WardrobeOutfit};
use crate::domain::view::{AnalysisView, PackingItem, VerdictColor};
use chrono::{DateTime, Datelike, Utc};
use std::fmt::Write;

pub fn render_analysis(view: &AnalysisView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Analysis Result");
    if let Some(kind) = &view.outfit_type {
        let _ = writeln!(out, "Detected: {}", kind.to_uppercase());
    }
    let mark = match view.verdict_color {
        VerdictColor::Green => "✔",
        VerdictColor::Red => "✘",
    };
    let _ = writeln!(out, "Verdict: {} {}", mark, view.verdict);
    let _ = writeln!(
        out,
        "Confidence: {} ({}%)",
        view.confidence.label(),
        view.outfit_score
    );

    for reason in &view.reasons {
        let _ = writeln!(out, "  ✓ {}", reason);
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Temp: {}°C  ({})",
        format_reading(view.weather.temp),
        view.weather.condition
    );
    for line in &view.weather.breakdown {
        let _ = writeln!(out, "  · {}", line);
    }

    if let Some(tip) = &view.fabric_tip {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", tip.title);
        let _ = writeln!(out, "  {}", tip.tip);
    }

    if !view.suggestions.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Alternative Options: {}", view.suggestions.join(", "));
    }

    if !view.accessories.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "You might need");
        for accessory in &view.accessories {
            let _ = writeln!(out, "  {} {}", accessory.icon.glyph(), accessory.name);
        }
    }

    if !view.packing_list.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Travel Essentials");
        out.push_str(&render_packing(&view.packing_list));
    }

    if let Some(id) = &view.image_id {
        let _ = writeln!(out);
        let _ = writeln!(out, "Image ID: {}", id);
    }

    out
}

pub fn render_packing(items: &[PackingItem]) -> String {
    let mut out = String::new();
    for item in items {
        let _ = writeln!(out, "  ✓ {} - {}", item.item, item.reason);
    }
    out
}

pub fn render_travel_pack(city: &str, pack: &TravelPackResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Packing for {} ({}°C)",
        pack.city.as_deref().unwrap_or(city),
        format_reading(pack.temperature)
    );

    let mut any = false;
    if let Some(recommendation) = &pack.packing_recommendation {
        for (category, items) in recommendation {
            let names: Vec<&str> = items
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|v| v.as_str())
                .collect();
            if !names.is_empty() {
                any = true;
                let _ = writeln!(out, "  {}: {}", category, names.join(", "));
            }
        }
    }
    for item in pack.suggested_clothes.iter().flatten() {
        any = true;
        let _ = writeln!(out, "  ✓ {}", item);
    }
    if !any {
        let _ = writeln!(out, "  No suggestions available.");
    }
    out
}

pub fn render_wardrobe(outfits: &[WardrobeOutfit], total: u64, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "My Wardrobe ({} items)", total);

    if outfits.is_empty() {
        let _ = writeln!(out, "Your wardrobe is empty.");
        let _ = writeln!(out, "Use `outfit-weather wardrobe add <image>` to add your first item!");
        return out;
    }

    for outfit in outfits {
        let last_worn = match &outfit.last_worn {
            Some(date) => format!("Last worn: {}", date),
            None => "Never worn".to_string(),
        };
        let active = if is_worn_recently(outfit, now) {
            " [Active]"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "  #{:<6} {:<12}{} {} · worn {} times",
            outfit.id.to_string(),
            outfit.display_type(),
            active,
            last_worn,
            outfit.wear_count.unwrap_or(0)
        );
    }
    out
}

/// Monday-first month grid; worn days are bracketed.
pub fn render_month(view: &MonthView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Outfit Calendar {}-{:02}", view.year, view.month);
    let _ = writeln!(out, " Mo  Tu  We  Th  Fr  Sa  Su");

    let offset = view.first_weekday.num_days_from_monday() as usize;
    out.push_str(&"    ".repeat(offset));

    for (i, day) in view.days.iter().enumerate() {
        let n = day.date.day();
        if day.worn {
            let _ = write!(out, "[{:>2}]", n);
        } else {
            let _ = write!(out, " {:>2} ", n);
        }
        if (offset + i + 1) % 7 == 0 {
            out.push('\n');
        }
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
