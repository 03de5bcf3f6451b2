use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod delivery;
pub mod record;
pub mod session;
pub mod stamp;
pub mod startup_checks;

use tracing::Level;

use stamp::{Compositor, DEFAULT_ADDRESS_PLACEHOLDER, FontSet, RasterBackend, StampError};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub fonts: FontConfig,
    #[serde(default)]
    pub stamp: StampConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FontConfig {
    pub regular: PathBuf,
    pub bold: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StampConfig {
    /// JPEG quality on the 1-100 scale; 85 when unset
    #[serde(default)]
    pub jpeg_quality: Option<u8>,
    #[serde(default)]
    pub address_placeholder: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "Geostamp".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            regular: PathBuf::from("static/DejaVuSans.ttf"),
            bold: PathBuf::from("static/DejaVuSans-Bold.ttf"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
        }
    }
}

impl AppConfig {
    /// Log level from `flag` when given, else from the config; unknown names fall back to info
    pub fn tracing_level(&self, flag: Option<&str>) -> Level {
        match flag.unwrap_or(&self.log_level).to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

impl StampConfig {
    /// Export quality on the compositor's 0.0..=1.0 scale
    pub fn quality(&self) -> f32 {
        self.jpeg_quality.unwrap_or(85).clamp(1, 100) as f32 / 100.0
    }

    pub fn address_placeholder(&self) -> &str {
        self.address_placeholder
            .as_deref()
            .unwrap_or(DEFAULT_ADDRESS_PLACEHOLDER)
    }
}

/// Load fonts and build the raster compositor described by `config`.
pub fn create_compositor(config: &Config) -> Result<Compositor<RasterBackend>, StampError> {
    let fonts = FontSet::load(&config.fonts.regular, &config.fonts.bold)?;
    Ok(Compositor::new(RasterBackend::new(fonts))
        .with_quality(config.stamp.quality())
        .with_address_placeholder(config.stamp.address_placeholder()))
}
