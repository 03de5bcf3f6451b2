use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display format of the time/date overlay line, e.g. `14:05 - 01/03/2024`
pub const TIME_FORMAT: &str = "%H:%M - %d/%m/%Y";

/// A geolocation fix, optionally with its reverse-geocoded address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: f64,
    pub fix_timestamp: DateTime<FixedOffset>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Location {
    pub fn new(
        latitude: f64,
        longitude: f64,
        accuracy_meters: f64,
        fix_timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_meters,
            fix_timestamp,
            address: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// `lat, lon` fixed to six decimals
    pub fn coordinates_text(&self) -> String {
        format!("{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Metadata collected for one capture event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureRecord {
    pub id: Uuid,
    pub captured_at: DateTime<FixedOffset>,
    #[serde(default)]
    pub location: Option<Location>,
    pub operator_name: String,
    pub device_label: String,
}

impl CaptureRecord {
    pub fn new(
        captured_at: DateTime<FixedOffset>,
        operator_name: impl Into<String>,
        device_label: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            captured_at,
            location: None,
            operator_name: operator_name.into(),
            device_label: device_label.into(),
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach a late-arriving address. Returns false when there is no location
    /// fix to attach it to.
    pub fn set_address(&mut self, address: impl Into<String>) -> bool {
        match self.location.as_mut() {
            Some(location) => {
                location.address = Some(address.into());
                true
            }
            None => false,
        }
    }

    pub fn time_text(&self) -> String {
        self.captured_at.format(TIME_FORMAT).to_string()
    }

    pub fn person_device_text(&self) -> String {
        format!("{} | {}", self.operator_name, self.device_label)
    }

    /// Coordinates line; empty when no fix is available
    pub fn coordinates_text(&self) -> String {
        self.location
            .as_ref()
            .map(Location::coordinates_text)
            .unwrap_or_default()
    }

    /// Resolved address, or `placeholder` while it is still pending
    pub fn address_text<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.location
            .as_ref()
            .and_then(|l| l.address.as_deref())
            .unwrap_or(placeholder)
    }
}
