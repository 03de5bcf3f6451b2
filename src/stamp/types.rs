use image::Rgba;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Pixel size and weight of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub size: f32,
    pub weight: FontWeight,
}

impl FontSpec {
    pub fn new(size: f32, weight: FontWeight) -> Self {
        Self { size, weight }
    }

    pub fn regular(size: f32) -> Self {
        Self::new(size, FontWeight::Regular)
    }

    pub fn bold(size: f32) -> Self {
        Self::new(size, FontWeight::Bold)
    }
}

/// Typographic role of an overlay line. Each role fixes the size, weight
/// and line height used for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    /// Time/date line at the top of the stack
    Heading,
    /// Address lines
    Body,
    /// Coordinates and person/device lines
    Small,
}

impl FontRole {
    /// Multiplier applied to the role's font size to get its reserved line height
    pub fn line_height_factor(self) -> f32 {
        match self {
            FontRole::Heading => 1.4,
            FontRole::Body => 1.3,
            FontRole::Small => 1.4,
        }
    }

    pub fn weight(self) -> FontWeight {
        match self {
            FontRole::Heading | FontRole::Body => FontWeight::Bold,
            FontRole::Small => FontWeight::Regular,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    /// Light gray, used for coordinates
    Muted,
    /// White, used for the address
    Primary,
    /// Amber, used for person and device
    Accent,
    /// Sky blue, used for the time/date line
    Highlight,
}

impl ColorRole {
    pub fn rgba(self) -> Rgba<u8> {
        match self {
            ColorRole::Muted => Rgba([0xD1, 0xD5, 0xDB, 0xFF]),
            ColorRole::Primary => Rgba([0xFF, 0xFF, 0xFF, 0xFF]),
            ColorRole::Accent => Rgba([0xFB, 0xBF, 0x24, 0xFF]),
            ColorRole::Highlight => Rgba([0x38, 0xBD, 0xF8, 0xFF]),
        }
    }
}

/// Which record field a line was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Coordinates,
    Address,
    PersonDevice,
    Time,
}

/// A black gradient stop: `offset` runs from 0.0 (panel top) to 1.0 (image bottom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub alpha: f32,
}

/// Readability gradient painted behind the overlay text.
pub const PANEL_GRADIENT: [GradientStop; 3] = [
    GradientStop {
        offset: 0.0,
        alpha: 0.0,
    },
    GradientStop {
        offset: 0.2,
        alpha: 0.5,
    },
    GradientStop {
        offset: 1.0,
        alpha: 0.9,
    },
];
