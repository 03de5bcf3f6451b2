use image::Rgba;

use super::error::StampError;
use super::types::{FontSpec, GradientStop};

/// Width measurement of rendered text.
pub trait TextMeasure {
    /// Rendered width of `text` in pixels when drawn with `font`
    fn measure_text(&self, text: &str, font: FontSpec) -> Result<f32, StampError>;
}

/// A drawable surface the compositor paints onto. One surface is created per
/// invocation and dropped after encoding.
pub trait Surface: TextMeasure {
    fn dimensions(&self) -> (u32, u32);

    /// Paint a full-width black gradient from `top` down `height` pixels.
    fn fill_gradient_rect(&mut self, top: f32, height: f32, stops: &[GradientStop]);

    /// Draw one line of text right-aligned to `right_x`, with the bottom edge of
    /// the line box at `baseline_y`.
    fn draw_line(
        &mut self,
        text: &str,
        right_x: f32,
        baseline_y: f32,
        font: FontSpec,
        color: Rgba<u8>,
    );
}

/// Decodes source bytes into surfaces and encodes finished surfaces.
pub trait RenderBackend {
    type Surface: Surface;

    fn decode(&self, bytes: &[u8]) -> Result<Self::Surface, StampError>;

    /// Encode `surface` as a lossy image; `quality` is on a 0.0..=1.0 scale.
    fn encode(&self, surface: &Self::Surface, quality: f32) -> Result<Vec<u8>, StampError>;
}
