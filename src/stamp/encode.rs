use image::{DynamicImage, ImageEncoder, RgbaImage, codecs::jpeg::JpegEncoder};
use tracing::debug;

use super::error::StampError;

/// Map a 0.0..=1.0 quality onto the JPEG encoder's 1..=100 scale.
pub fn jpeg_quality(quality: f32) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Decode source bytes of any format the `image` crate recognises.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, StampError> {
    image::load_from_memory(bytes).map_err(StampError::Decode)
}

/// Encode `image` as JPEG into memory.
pub fn encode_jpeg(image: &RgbaImage, quality: f32) -> Result<Vec<u8>, StampError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(StampError::Export(format!(
            "cannot encode a {}x{} canvas",
            width, height
        )));
    }

    // JPEG doesn't support alpha channel, so convert to RGB
    let rgb_image = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let quality = jpeg_quality(quality);

    let mut output = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut output, quality);
    encoder
        .write_image(
            &rgb_image,
            rgb_image.width(),
            rgb_image.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| StampError::Export(e.to_string()))?;

    debug!(
        "Encoded {}x{} JPEG at quality {}: {} bytes",
        width,
        height,
        quality,
        output.len()
    );
    Ok(output)
}
