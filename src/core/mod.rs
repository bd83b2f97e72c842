pub mod analysis;
pub mod predict;
pub mod session;
pub mod wardrobe;

pub use crate::domain::model::{OutfitWeatherResponse, TravelPackResponse};
pub use crate::domain::ports::{ConfigProvider, OutfitBackend, Storage};
pub use crate::domain::view::AnalysisView;
pub use crate::utils::error::Result;
