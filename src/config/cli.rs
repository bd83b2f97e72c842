use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::domain::model::{Material, Occasion, DEFAULT_CATEGORY};
use crate::utils::error::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "outfit-weather")]
#[command(about = "Weather-aware outfit checks, travel packing and a personal wardrobe")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory holding the session token and pending outfit
    #[arg(long, global = true)]
    pub storage_dir: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check an outfit photo against the weather in a city
    Analyze(AnalyzeArgs),
    /// Packing suggestions for a city
    TravelPack {
        city: String,
        #[arg(long)]
        json: bool,
    },
    /// Detect the city for a pair of coordinates
    Locate {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Confirm or correct a prediction
    Feedback {
        image_id: String,
        #[arg(long)]
        predicted: Option<String>,
        /// The right category when the prediction was wrong
        #[arg(long)]
        correct: Option<String>,
    },
    Login {
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    Signup {
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
    Logout,
    /// Manage the saved wardrobe
    Wardrobe {
        #[command(subcommand)]
        command: WardrobeCommand,
    },
    /// Backend model metrics
    Metrics,
}

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// Outfit photo (jpg, png, webp, gif)
    pub image: PathBuf,

    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub city: Option<String>,

    /// Detect the city from coordinates instead of --city
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    #[arg(long, value_enum, default_value_t = Occasion::Casual)]
    pub occasion: Occasion,

    #[arg(long, value_enum)]
    pub material: Option<Material>,

    /// Save the result to the wardrobe (kept locally until login when logged out)
    #[arg(long)]
    pub save: bool,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum WardrobeCommand {
    List {
        #[arg(long)]
        json: bool,
    },
    Add {
        image: PathBuf,
        #[arg(long, default_value = DEFAULT_CATEGORY)]
        category: String,
    },
    Delete {
        id: String,
    },
    /// Mark an outfit as worn today
    Wear {
        id: String,
    },
    Stats,
    /// Month view of worn days, plus the outfits worn on one day
    Calendar {
        /// Day to list, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

impl CliConfig {
    /// Defaults, then the config file, then command-line flags.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading configuration from {}", path.display());
            settings = settings.merge_toml(&TomlConfig::from_file(path)?);
        }

        if let Some(url) = &self.api_url {
            settings.api_base_url = url.clone();
        }
        if let Some(dir) = &self.storage_dir {
            settings.storage_dir = dir.clone();
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_seconds = timeout;
        }

        Ok(settings)
    }
}
