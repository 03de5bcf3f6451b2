use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use std::path::Path;
use std::sync::Arc;

use super::canvas::{RenderBackend, Surface, TextMeasure};
use super::encode::{decode_image, encode_jpeg};
use super::error::StampError;
use super::panel::paint_vertical_gradient;
use super::types::{FontSpec, FontWeight, GradientStop};

/// Regular and bold faces used for the overlay.
pub struct FontSet {
    regular: FontVec,
    bold: FontVec,
}

impl FontSet {
    pub fn from_bytes(regular: Vec<u8>, bold: Vec<u8>) -> Result<Self, StampError> {
        let regular = FontVec::try_from_vec(regular)
            .map_err(|_| StampError::Font("Failed to parse regular font".to_string()))?;
        let bold = FontVec::try_from_vec(bold)
            .map_err(|_| StampError::Font("Failed to parse bold font".to_string()))?;
        Ok(Self { regular, bold })
    }

    /// Load both faces from TTF/OTF files
    pub fn load(regular: &Path, bold: &Path) -> Result<Self, StampError> {
        let regular_data = std::fs::read(regular)
            .map_err(|e| StampError::Font(format!("Failed to read {:?}: {}", regular, e)))?;
        let bold_data = std::fs::read(bold)
            .map_err(|e| StampError::Font(format!("Failed to read {:?}: {}", bold, e)))?;
        Self::from_bytes(regular_data, bold_data)
    }

    pub fn face(&self, weight: FontWeight) -> &FontVec {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }

    /// Advance width of `text`, kerning included. `imageproc`'s `text_size`
    /// rounds to integer ink bounds, which would not match where `draw_text_mut`
    /// places the glyphs.
    pub fn text_width(&self, text: &str, font: FontSpec) -> f32 {
        let scaled = self.face(font.weight).as_scaled(PxScale::from(font.size));

        let mut width = 0.0f32;
        let mut prev_glyph: Option<ab_glyph::GlyphId> = None;
        for c in text.chars() {
            let glyph_id = scaled.glyph_id(c);
            if let Some(prev) = prev_glyph {
                width += scaled.kern(prev, glyph_id);
            }
            width += scaled.h_advance(glyph_id);
            prev_glyph = Some(glyph_id);
        }
        width
    }

    /// Ascent-to-descent height of a line at `font`
    pub fn line_box_height(&self, font: FontSpec) -> f32 {
        self.face(font.weight)
            .as_scaled(PxScale::from(font.size))
            .height()
    }
}

/// Backend rasterizing with `imageproc` and `ab_glyph`, exporting JPEG.
#[derive(Clone)]
pub struct RasterBackend {
    fonts: Arc<FontSet>,
}

impl RasterBackend {
    pub fn new(fonts: FontSet) -> Self {
        Self {
            fonts: Arc::new(fonts),
        }
    }

    /// Build a surface from an already decoded image. The source is copied,
    /// never modified.
    pub fn surface_from_image(&self, image: &DynamicImage) -> RasterSurface {
        RasterSurface {
            image: image.to_rgba8(),
            fonts: self.fonts.clone(),
        }
    }
}

impl RenderBackend for RasterBackend {
    type Surface = RasterSurface;

    fn decode(&self, bytes: &[u8]) -> Result<RasterSurface, StampError> {
        let image = decode_image(bytes)?;
        Ok(self.surface_from_image(&image))
    }

    fn encode(&self, surface: &RasterSurface, quality: f32) -> Result<Vec<u8>, StampError> {
        encode_jpeg(&surface.image, quality)
    }
}

pub struct RasterSurface {
    image: RgbaImage,
    fonts: Arc<FontSet>,
}

impl RasterSurface {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl TextMeasure for RasterSurface {
    fn measure_text(&self, text: &str, font: FontSpec) -> Result<f32, StampError> {
        if !font.size.is_finite() || font.size <= 0.0 {
            return Err(StampError::Measure(format!(
                "invalid font size {}",
                font.size
            )));
        }
        Ok(self.fonts.text_width(text, font))
    }
}

impl Surface for RasterSurface {
    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn fill_gradient_rect(&mut self, top: f32, height: f32, stops: &[GradientStop]) {
        paint_vertical_gradient(&mut self.image, top, height, stops);
    }

    fn draw_line(
        &mut self,
        text: &str,
        right_x: f32,
        baseline_y: f32,
        font: FontSpec,
        color: Rgba<u8>,
    ) {
        if text.is_empty() {
            return;
        }

        let width = self.fonts.text_width(text, font);
        let x = (right_x - width).round() as i32;
        // imageproc positions text by its top edge
        let y = (baseline_y - self.fonts.line_box_height(font)).round() as i32;

        draw_text_mut(
            &mut self.image,
            color,
            x,
            y,
            PxScale::from(font.size),
            self.fonts.face(font.weight),
            text,
        );
    }
}
