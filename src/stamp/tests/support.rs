use chrono::{DateTime, FixedOffset};
use image::{GenericImageView, ImageFormat, Rgb, Rgba, RgbImage};
use std::io::Cursor;

use crate::record::{CaptureRecord, Location};
use crate::stamp::{FontSpec, GradientStop, RenderBackend, StampError, Surface, TextMeasure};

/// Each character advances half the font size.
pub const ADVANCE: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Gradient {
        top: f32,
        height: f32,
        stops: Vec<GradientStop>,
    },
    Line {
        text: String,
        right_x: f32,
        baseline: f32,
        font: FontSpec,
        color: Rgba<u8>,
    },
}

/// Backend with monospace metrics that records draw calls instead of
/// rasterizing, and "encodes" the recorded calls.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    pub fail_measure: bool,
    pub fail_encode: bool,
}

pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<DrawOp>,
    fail_measure: bool,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            fail_measure: false,
        }
    }

    pub fn lines(&self) -> Vec<(String, f32, f32, FontSpec, Rgba<u8>)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line {
                    text,
                    right_x,
                    baseline,
                    font,
                    color,
                } => Some((text.clone(), *right_x, *baseline, *font, *color)),
                DrawOp::Gradient { .. } => None,
            })
            .collect()
    }
}

pub fn mono_width(text: &str, font: FontSpec) -> f32 {
    text.chars().count() as f32 * font.size * ADVANCE
}

impl TextMeasure for RecordingSurface {
    fn measure_text(&self, text: &str, font: FontSpec) -> Result<f32, StampError> {
        if self.fail_measure {
            return Err(StampError::Measure("measurement unavailable".to_string()));
        }
        Ok(mono_width(text, font))
    }
}

impl Surface for RecordingSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_gradient_rect(&mut self, top: f32, height: f32, stops: &[GradientStop]) {
        self.ops.push(DrawOp::Gradient {
            top,
            height,
            stops: stops.to_vec(),
        });
    }

    fn draw_line(
        &mut self,
        text: &str,
        right_x: f32,
        baseline_y: f32,
        font: FontSpec,
        color: Rgba<u8>,
    ) {
        self.ops.push(DrawOp::Line {
            text: text.to_string(),
            right_x,
            baseline: baseline_y,
            font,
            color,
        });
    }
}

impl RenderBackend for RecordingBackend {
    type Surface = RecordingSurface;

    fn decode(&self, bytes: &[u8]) -> Result<RecordingSurface, StampError> {
        let image = image::load_from_memory(bytes).map_err(StampError::Decode)?;
        let (width, height) = image.dimensions();
        let mut surface = RecordingSurface::new(width, height);
        surface.fail_measure = self.fail_measure;
        Ok(surface)
    }

    fn encode(&self, surface: &RecordingSurface, _quality: f32) -> Result<Vec<u8>, StampError> {
        if self.fail_encode || surface.width == 0 || surface.height == 0 {
            return Err(StampError::Export("encoder rejected surface".to_string()));
        }
        Ok(format!("{}x{}\n{:?}", surface.width, surface.height, surface.ops).into_bytes())
    }
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, ImageFormat::Png).unwrap();
    cursor.into_inner()
}

pub fn at(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap()
}

pub const SCENARIO_ADDRESS: &str = "123 Nguyen Hue, District 1, Ho Chi Minh City";

/// Record used by the reference scenario: Ho Chi Minh City, 14:05 on 1 March 2024.
pub fn scenario_record() -> CaptureRecord {
    CaptureRecord::new(at("2024-03-01T14:05:00+07:00"), "An", "iPhone").with_location(
        Location::new(10.762622, 106.660172, 15.0, at("2024-03-01T14:04:55+07:00"))
            .with_address(SCENARIO_ADDRESS),
    )
}
