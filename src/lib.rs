pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::Settings;

pub use adapters::{geocode::GeoLocator, http::ApiClient, storage::LocalStorage};
pub use crate::core::{predict::PredictFlow, session::Session, wardrobe::Wardrobe};
pub use utils::error::{AppError, Result};
