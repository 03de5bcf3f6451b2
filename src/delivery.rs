use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use crate::record::{CaptureRecord, Location};
use crate::stamp::{StampError, StampedImage};

/// File name for a locally saved capture: `{operator}_{YYYYMMDD_HHMMSS}.jpg`.
pub fn local_filename(record: &CaptureRecord) -> String {
    format!(
        "{}_{}.jpg",
        sanitize_name(&record.operator_name),
        record.captured_at.format("%Y%m%d_%H%M%S")
    )
}

fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('_');
    if cleaned.is_empty() {
        "capture".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Write `stamped` into `directory` under its derived file name.
pub async fn save_local(
    directory: &Path,
    record: &CaptureRecord,
    stamped: &StampedImage,
) -> Result<PathBuf, StampError> {
    tokio::fs::create_dir_all(directory).await?;
    let path = directory.join(local_filename(record));
    tokio::fs::write(&path, &stamped.bytes).await?;
    info!(capture_id = %record.id, "Saved stamped capture to {:?}", path);
    Ok(path)
}

/// Encoded image as carried in a delivery payload.
#[derive(Debug, Clone, Serialize)]
pub struct EncodedImage {
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
    pub sha256: String,
    /// Base64 (standard alphabet) of the encoded bytes
    pub data: String,
}

/// Structured upload body: the stamped image plus the full metadata record.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryPayload {
    pub capture_id: Uuid,
    pub operator_name: String,
    pub device_label: String,
    pub captured_at: DateTime<FixedOffset>,
    pub location: Option<Location>,
    pub image: EncodedImage,
}

impl DeliveryPayload {
    pub fn new(record: &CaptureRecord, stamped: &StampedImage) -> Self {
        let digest = Sha256::digest(&stamped.bytes);
        let sha256 = digest.iter().map(|b| format!("{:02x}", b)).collect();

        Self {
            capture_id: record.id,
            operator_name: record.operator_name.clone(),
            device_label: record.device_label.clone(),
            captured_at: record.captured_at,
            location: record.location.clone(),
            image: EncodedImage {
                mime_type: StampedImage::MIME_TYPE,
                width: stamped.width,
                height: stamped.height,
                sha256,
                data: STANDARD.encode(&stamped.bytes),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
