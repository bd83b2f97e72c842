use crate::adapters::http::ApiClient;
use crate::domain::model::{
    ImageUpload, NewOutfit, RecordId, WardrobeOutfit, WardrobeStats, WARDROBE_CATEGORIES,
};
use crate::utils::error::{AppError, Result};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc, Weekday};
use std::collections::BTreeSet;

const RECENT_WEAR_DAYS: i64 = 7;

/// Wardrobe operations for a logged-in user.
pub struct Wardrobe<'a> {
    api: &'a ApiClient,
}

#[derive(Debug, Clone)]
pub struct WardrobeOverview {
    pub outfits: Vec<WardrobeOutfit>,
    pub stats: Option<WardrobeStats>,
}

impl WardrobeOverview {
    pub fn total_items(&self) -> u64 {
        self.stats
            .as_ref()
            .and_then(|s| s.total_items)
            .filter(|total| *total > 0)
            .unwrap_or(self.outfits.len() as u64)
    }
}

impl<'a> Wardrobe<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<WardrobeOutfit>> {
        let outfits = self.api.list_outfits().await?;
        tracing::debug!("Fetched {} wardrobe items", outfits.len());
        Ok(outfits)
    }

    /// Listing plus stats. Stats are optional: a failure there is logged.
    pub async fn overview(&self) -> Result<WardrobeOverview> {
        let (outfits, stats) = tokio::join!(self.api.list_outfits(), self.api.stats());
        let stats = match stats {
            Ok(stats) => Some(stats),
            Err(e) => {
                tracing::warn!("Failed to load stats: {}", e);
                None
            }
        };
        Ok(WardrobeOverview {
            outfits: outfits?,
            stats,
        })
    }

    /// Uploads the image, then saves its metadata with wardrobe defaults.
    pub async fn add(&self, image: &ImageUpload, category: &str) -> Result<Option<RecordId>> {
        if !WARDROBE_CATEGORIES.contains(&category) {
            return Err(AppError::validation(format!(
                "Unknown category '{}'. Choose one of: {}",
                category,
                WARDROBE_CATEGORIES.join(", ")
            )));
        }

        let image_url = self.api.upload_outfit(image, category).await?;
        tracing::debug!("Uploaded image to {}", image_url);

        let saved = self
            .api
            .save_outfit(&NewOutfit::uploaded(image_url, category))
            .await?;
        tracing::info!("Outfit saved to wardrobe (ID: {:?})", saved);
        Ok(saved)
    }

    pub async fn save(&self, outfit: &NewOutfit) -> Result<Option<RecordId>> {
        self.api.save_outfit(outfit).await
    }

    pub async fn remove(&self, id: &RecordId) -> Result<()> {
        self.api.delete_outfit(id).await?;
        tracing::info!("Deleted outfit {}", id);
        Ok(())
    }

    pub async fn wear(&self, id: &RecordId) -> Result<()> {
        self.api.wear_outfit(id).await?;
        tracing::info!("Marked outfit {} as worn", id);
        Ok(())
    }

    pub async fn worn_on(&self, date: NaiveDate) -> Result<Vec<WardrobeOutfit>> {
        self.api.outfits_by_date(date).await
    }
}

/// Accepts RFC 3339, naive ISO timestamps (treated as UTC) and bare dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn is_worn_recently(outfit: &WardrobeOutfit, now: DateTime<Utc>) -> bool {
    outfit
        .last_worn
        .as_deref()
        .and_then(parse_timestamp)
        .is_some_and(|worn| now - worn < Duration::days(RECENT_WEAR_DAYS))
}

/// Every calendar day any outfit was worn on.
pub fn worn_dates(outfits: &[WardrobeOutfit]) -> BTreeSet<NaiveDate> {
    outfits
        .iter()
        .filter_map(|o| o.worn_history.as_ref())
        .flatten()
        .filter_map(|raw| parse_timestamp(raw))
        .map(|dt| dt.date_naive())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub worn: bool,
}

#[derive(Debug, Clone)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub first_weekday: Weekday,
    pub days: Vec<CalendarDay>,
}

impl MonthView {
    pub fn worn_count(&self) -> usize {
        self.days.iter().filter(|d| d.worn).count()
    }
}

pub fn month_view(year: i32, month: u32, worn: &BTreeSet<NaiveDate>) -> Result<MonthView> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::validation(format!("Invalid month {}-{:02}", year, month)))?;

    let days = first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|date| CalendarDay {
            date,
            worn: worn.contains(&date),
        })
        .collect();

    Ok(MonthView {
        year,
        month,
        first_weekday: first.weekday(),
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn outfit(last_worn: Option<&str>, history: &[&str]) -> WardrobeOutfit {
        WardrobeOutfit {
            id: RecordId::Int(1),
            kind: Some("coat".to_string()),
            category: None,
            image_url: None,
            last_worn: last_worn.map(str::to_string),
            wear_count: Some(history.len() as u32),
            worn_history: Some(history.iter().map(|s| s.to_string()).collect()),
            color: None,
            occasion: None,
            notes: None,
        }
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2026-10-01T08:30:00Z").is_some());
        assert!(parse_timestamp("2026-10-01T08:30:00.123456").is_some());
        assert!(parse_timestamp("2026-10-01 08:30:00").is_some());
        assert_eq!(
            parse_timestamp("2026-10-01").unwrap(),
            Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap()
        );
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_is_worn_recently() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        assert!(is_worn_recently(&outfit(Some("2026-10-15T09:00:00"), &[]), now));
        assert!(!is_worn_recently(&outfit(Some("2026-10-12T11:00:00"), &[]), now));
        assert!(!is_worn_recently(&outfit(None, &[]), now));
    }

    #[test]
    fn test_worn_dates_deduplicates_days() {
        let outfits = vec![
            outfit(None, &["2026-10-01T08:00:00", "2026-10-01T20:00:00"]),
            outfit(None, &["2026-10-03", "not a date"]),
        ];
        let dates = worn_dates(&outfits);
        assert_eq!(dates.len(), 2);
        assert!(dates.contains(&NaiveDate::from_ymd_opt(2026, 10, 3).unwrap()));
    }

    #[test]
    fn test_month_view_marks_worn_days() {
        let mut worn = BTreeSet::new();
        worn.insert(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
        worn.insert(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());

        let view = month_view(2026, 2, &worn).unwrap();
        assert_eq!(view.days.len(), 28);
        assert_eq!(view.worn_count(), 1);
        assert_eq!(view.first_weekday, Weekday::Sun);
        assert!(view.days[13].worn);

        assert!(month_view(2026, 13, &worn).is_err());
    }

    #[test]
    fn test_overview_total_falls_back_to_listing() {
        let overview = WardrobeOverview {
            outfits: vec![outfit(None, &[]), outfit(None, &[])],
            stats: Some(WardrobeStats::default()),
        };
        assert_eq!(overview.total_items(), 2);
    }
}
