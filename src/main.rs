use chrono::{DateTime, FixedOffset, Local};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use geostamp::{
    Config, create_compositor,
    delivery::{DeliveryPayload, save_local},
    record::{CaptureRecord, Location},
    startup_checks,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Global options that apply to all commands
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Overrides `app.log_level` from the config file
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Stamp capture metadata onto a photo
    Stamp {
        /// Source image file
        input: PathBuf,

        /// Name of the person taking the photo
        #[arg(long)]
        operator: String,

        /// Device description shown next to the operator
        #[arg(long)]
        device: String,

        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,

        /// Accuracy of the location fix in meters
        #[arg(long, default_value_t = 0.0)]
        accuracy: f64,

        /// Reverse-geocoded address, if already known
        #[arg(long)]
        address: Option<String>,

        /// Capture time as RFC 3339 (defaults to now)
        #[arg(long)]
        time: Option<String>,

        /// Overrides the configured output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Also write the upload payload as JSON to this file
        #[arg(long)]
        payload: Option<PathBuf>,
    },

    /// Verify fonts and output directory
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (config, loaded_from) = load_config(&cli.config)?;

    let level = config.app.tracing_level(cli.log_level.as_deref());
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match loaded_from {
        Some(path) => info!("Configuration loaded from: {:?}", path),
        None => info!("Config file not found at {:?}, using defaults", cli.config),
    }

    match cli.command {
        Commands::Check => run_checks(&config).await,
        Commands::Stamp {
            input,
            operator,
            device,
            lat,
            lon,
            accuracy,
            address,
            time,
            output_dir,
            payload,
        } => {
            let captured_at = parse_capture_time(time.as_deref())?;
            let mut record = CaptureRecord::new(captured_at, operator, device);

            if let (Some(lat), Some(lon)) = (lat, lon) {
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                    return Err(format!("Coordinates out of range: {}, {}", lat, lon).into());
                }
                let mut location = Location::new(lat, lon, accuracy, captured_at);
                location.address = address;
                record = record.with_location(location);
            } else if address.is_some() {
                tracing::warn!("--address given without --lat/--lon, ignoring it");
            }

            let output_dir = output_dir.unwrap_or_else(|| config.output.directory.clone());
            run_stamp(&config, input, record, output_dir, payload).await
        }
    }
}

// Runs before the subscriber exists; the caller logs where the config came from
fn load_config(
    config_path: &Path,
) -> Result<(Config, Option<&Path>), Box<dyn std::error::Error>> {
    if config_path.exists() {
        let config_content = std::fs::read_to_string(config_path)?;
        let config = toml_edit::de::from_str::<Config>(&config_content)?;
        Ok((config, Some(config_path)))
    } else {
        Ok((Config::default(), None))
    }
}

fn parse_capture_time(
    time: Option<&str>,
) -> Result<DateTime<FixedOffset>, Box<dyn std::error::Error>> {
    match time {
        Some(value) => Ok(DateTime::parse_from_rfc3339(value)?),
        None => Ok(Local::now().fixed_offset()),
    }
}

async fn run_checks(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match startup_checks::perform_startup_checks(config).await {
        Ok(()) => {
            info!("{} is ready", config.app.name);
            Ok(())
        }
        Err(errors) => {
            for error in &errors {
                tracing::error!("Startup check failed: {}", error);
            }
            Err(format!("{} startup checks failed", errors.len()).into())
        }
    }
}

async fn run_stamp(
    config: &Config,
    input: PathBuf,
    record: CaptureRecord,
    output_dir: PathBuf,
    payload_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let compositor = create_compositor(config)?;
    let source = tokio::fs::read(&input).await?;
    info!("Stamping {:?} ({} bytes)", input, source.len());

    let stamped = compositor.stamp_async(source, &record).await?;
    let saved = save_local(&output_dir, &record, &stamped).await?;
    println!("{}", saved.display());

    if let Some(payload_path) = payload_path {
        let payload = DeliveryPayload::new(&record, &stamped);
        tokio::fs::write(&payload_path, payload.to_json()?).await?;
        info!("Delivery payload written to {:?}", payload_path);
    }

    Ok(())
}
