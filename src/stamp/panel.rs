use image::RgbaImage;

use super::types::GradientStop;

/// Alpha of the gradient at `t` (0.0 = panel top, 1.0 = panel bottom),
/// linearly interpolated between stops and clamped at both ends.
pub fn gradient_alpha(stops: &[GradientStop], t: f32) -> f32 {
    let Some(first) = stops.first() else {
        return 0.0;
    };
    if t <= first.offset {
        return first.alpha;
    }

    for pair in stops.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        if t <= to.offset {
            let span = to.offset - from.offset;
            if span <= f32::EPSILON {
                return to.alpha;
            }
            let local = (t - from.offset) / span;
            return from.alpha + (to.alpha - from.alpha) * local;
        }
    }

    stops.last().map(|s| s.alpha).unwrap_or(0.0)
}

/// Darken `image` with a full-width black gradient running from `top` down
/// `height` pixels. Rows outside the image are skipped.
pub fn paint_vertical_gradient(
    image: &mut RgbaImage,
    top: f32,
    height: f32,
    stops: &[GradientStop],
) {
    if height <= 0.0 {
        return;
    }

    let first_row = top.floor().max(0.0) as u32;
    let last_row = ((top + height).ceil().max(0.0) as u32).min(image.height());

    for y in first_row..last_row {
        // Sample at the pixel centre
        let t = ((y as f32 + 0.5 - top) / height).clamp(0.0, 1.0);
        let alpha = gradient_alpha(stops, t).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            continue;
        }
        let keep = 1.0 - alpha;

        for x in 0..image.width() {
            let pixel = image.get_pixel_mut(x, y);
            for channel in 0..3 {
                pixel[channel] = (pixel[channel] as f32 * keep).round() as u8;
            }
        }
    }
}
