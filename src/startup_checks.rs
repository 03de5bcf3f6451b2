use crate::Config;
use crate::stamp::FontSet;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum StartupCheckError {
    #[error("Failed to create output directory: {0}")]
    OutputDirectoryCreationFailed(#[from] std::io::Error),

    #[error("Font file missing: {0}")]
    FontMissing(String),

    #[error("Font file unusable: {0}")]
    FontUnusable(String),
}

pub async fn perform_startup_checks(config: &Config) -> Result<(), Vec<StartupCheckError>> {
    let mut errors = Vec::new();

    info!("Performing startup checks...");

    let output_dir = Path::new(&config.output.directory);
    if !output_dir.exists() {
        info!("Output directory does not exist, creating: {:?}", output_dir);
        if let Err(e) = tokio::fs::create_dir_all(output_dir).await {
            error!("Failed to create output directory: {}", e);
            errors.push(StartupCheckError::OutputDirectoryCreationFailed(e));
        } else {
            info!("Output directory created successfully");
        }
    } else {
        info!("Output directory exists: {:?}", output_dir);
    }

    let mut fonts_present = true;
    for font in [&config.fonts.regular, &config.fonts.bold] {
        if font.exists() {
            info!("Font file found: {:?}", font);
        } else {
            warn!("Font file missing: {:?}", font);
            errors.push(StartupCheckError::FontMissing(font.display().to_string()));
            fonts_present = false;
        }
    }

    // Only worth parsing once both files are there
    if fonts_present {
        match FontSet::load(&config.fonts.regular, &config.fonts.bold) {
            Ok(_) => info!("Fonts parsed successfully"),
            Err(e) => {
                error!("Fonts could not be loaded: {}", e);
                errors.push(StartupCheckError::FontUnusable(e.to_string()));
            }
        }
    }

    if errors.is_empty() {
        info!("All startup checks passed");
        Ok(())
    } else {
        error!("Startup checks failed with {} errors", errors.len());
        Err(errors)
    }
}
