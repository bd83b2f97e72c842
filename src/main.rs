use anyhow::Context;
use chrono::{Datelike, Local, Utc};
use clap::Parser;
use outfit_weather::app::report;
use outfit_weather::config::cli::{AnalyzeArgs, Command, WardrobeCommand};
use outfit_weather::core::predict::wardrobe_record;
use outfit_weather::core::session::PendingOutcome;
use outfit_weather::core::wardrobe::{month_view, worn_dates};
use outfit_weather::domain::model::{AnalyzeRequest, Feedback, ImageUpload, RecordId};
use outfit_weather::utils::error::ErrorSeverity;
use outfit_weather::utils::{logger, validation::validate_image_file, validation::Validate};
use outfit_weather::{
    ApiClient, AppError, CliConfig, GeoLocator, LocalStorage, PredictFlow, Session, Settings,
    Wardrobe,
};

type CliSession = Session<LocalStorage>;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config).await {
        let Some(app_error) = e.downcast_ref::<AppError>() else {
            tracing::error!("❌ {:#}", e);
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        };

        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            app_error,
            app_error.category(),
            app_error.severity()
        );
        eprintln!("❌ {}", app_error.user_friendly_message());
        eprintln!("💡 {}", app_error.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match app_error.severity() {
            ErrorSeverity::Low => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(config: CliConfig) -> anyhow::Result<()> {
    let settings = config.settings()?;
    // 驗證配置
    settings.validate()?;

    let session = Session::new(LocalStorage::new(settings.storage_dir.clone()));
    let token = session.token().await?;
    let mut api = ApiClient::from_config(&settings)?.with_token(token);
    tracing::debug!(
        "Backend {} (logged in: {})",
        api.base_url(),
        api.has_token()
    );

    match config.command {
        Command::Analyze(args) => analyze(args, &settings, &session, &api).await?,
        Command::TravelPack { city, json } => {
            let pack = api.travel_pack(&city).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&pack)?);
            } else {
                print!("{}", report::render_travel_pack(&city, &pack));
            }
        }
        Command::Locate { lat, lon } => {
            let city = GeoLocator::from_config(&settings)?.reverse(lat, lon).await?;
            println!("{}", city);
        }
        Command::Feedback {
            image_id,
            predicted,
            correct,
        } => {
            let is_correct = match (&predicted, &correct) {
                (_, None) => true,
                (Some(p), Some(c)) => p.eq_ignore_ascii_case(c),
                (None, Some(_)) => false,
            };
            let feedback = Feedback {
                image_id: RecordId::from(image_id.as_str()),
                predicted_class: predicted,
                correct_class: correct,
                is_correct,
            };
            api.submit_feedback(&feedback).await?;
            println!("✅ Thanks! Feedback recorded for image {}.", feedback.image_id);
        }
        Command::Login { email, password } => {
            let password = password_or_prompt(password)?;
            let outcome = session.login(&mut api, &email, &password).await?;
            println!("{}", outcome.message());
            if let PendingOutcome::Failed(reason) = &outcome.pending {
                eprintln!("⚠️  {}", reason);
            }
        }
        Command::Signup { email, password } => {
            let password = password_or_prompt(password)?;
            session.signup(&api, &email, &password).await?;
            println!("✅ Account created. Run `outfit-weather login {}` next.", email);
        }
        Command::Logout => {
            session.logout().await?;
            println!("Logged out.");
        }
        Command::Wardrobe { command } => {
            session.require_token().await?;
            wardrobe(command, &api).await?;
        }
        Command::Metrics => {
            let metrics = api.metrics().await?;
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        }
    }

    Ok(())
}

async fn analyze(
    args: AnalyzeArgs,
    settings: &Settings,
    session: &CliSession,
    api: &ApiClient,
) -> anyhow::Result<()> {
    validate_image_file("image", &args.image.to_string_lossy())?;

    let city = match (args.city, args.lat, args.lon) {
        (Some(city), _, _) => city,
        (None, Some(lat), Some(lon)) => {
            GeoLocator::from_config(settings)?.reverse(lat, lon).await?
        }
        _ => {
            return Err(AppError::validation("Provide --city or both --lat and --lon").into());
        }
    };

    let image = ImageUpload::from_path(&args.image)
        .await
        .with_context(|| format!("Failed to read image {}", args.image.display()))?;
    let request = AnalyzeRequest {
        image,
        city,
        occasion: Some(args.occasion),
        material: args.material,
    };

    let logged_in = api.has_token();
    let view = PredictFlow::new(api).run(&request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", report::render_analysis(&view));
    }

    if args.save {
        let Some(record) = wardrobe_record(&view, args.occasion) else {
            eprintln!("⚠️  No hosted image for this result; use `outfit-weather wardrobe add` instead.");
            return Ok(());
        };
        if logged_in {
            let id = Wardrobe::new(api).save(&record).await?;
            println!("✅ Outfit saved to Wardrobe! (ID: {})", display_id(id));
        } else {
            session.stash_pending_outfit(&record).await?;
            println!("💾 Saved locally. It will be added to your wardrobe after `outfit-weather login`.");
        }
    }

    Ok(())
}

async fn wardrobe(command: WardrobeCommand, api: &ApiClient) -> anyhow::Result<()> {
    let wardrobe = Wardrobe::new(api);

    match command {
        WardrobeCommand::List { json } => {
            let overview = wardrobe.overview().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&overview.outfits)?);
            } else {
                print!(
                    "{}",
                    report::render_wardrobe(&overview.outfits, overview.total_items(), Utc::now())
                );
            }
        }
        WardrobeCommand::Add { image, category } => {
            validate_image_file("image", &image.to_string_lossy())?;
            let upload = ImageUpload::from_path(&image)
                .await
                .with_context(|| format!("Failed to read image {}", image.display()))?;
            let id = wardrobe.add(&upload, &category).await?;
            println!("✅ Outfit saved to Wardrobe! (ID: {})", display_id(id));
        }
        WardrobeCommand::Delete { id } => {
            wardrobe.remove(&RecordId::from(id.as_str())).await?;
            println!("Item deleted from wardrobe.");
        }
        WardrobeCommand::Wear { id } => {
            wardrobe.wear(&RecordId::from(id.as_str())).await?;
            println!("Marked as worn today.");
        }
        WardrobeCommand::Stats => {
            let overview = wardrobe.overview().await?;
            println!("Total Items: {}", overview.total_items());
            if let Some(stats) = overview.stats.filter(|s| !s.extra.is_empty()) {
                println!("{}", serde_json::to_string_pretty(&stats.extra)?);
            }
        }
        WardrobeCommand::Calendar { date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let outfits = wardrobe.list().await?;
            let worn = worn_dates(&outfits);
            print!(
                "{}",
                report::render_month(&month_view(date.year(), date.month(), &worn)?)
            );

            println!();
            println!("Worn on {}", date.format("%A, %B %-d"));
            let day = wardrobe.worn_on(date).await?;
            if day.is_empty() {
                println!("  No outfits worn on this day.");
            }
            for outfit in &day {
                println!("  #{} {}", outfit.id, outfit.display_type());
            }
        }
    }

    Ok(())
}

fn display_id(id: Option<RecordId>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "?".to_string())
}

fn password_or_prompt(password: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
