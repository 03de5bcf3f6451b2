use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use std::path::Path;

use super::support::{at, png_bytes, scenario_record};
use crate::record::{CaptureRecord, Location};
use crate::stamp::encode::decode_image;
use crate::stamp::{
    Compositor, FieldId, FontSet, FontSpec, LayoutParams, PANEL_GRADIENT, RasterBackend,
    RenderBackend, Surface, TextMeasure,
};

fn load_test_fonts() -> FontSet {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    FontSet::load(
        &root.join("static/DejaVuSans.ttf"),
        &root.join("static/DejaVuSans-Bold.ttf"),
    )
    .expect("bundled DejaVu fonts should load")
}

#[test]
fn test_font_load_missing_file_fails() {
    let result = FontSet::load(
        Path::new("static/does-not-exist.ttf"),
        Path::new("static/does-not-exist-bold.ttf"),
    );
    assert!(result.is_err());
}

#[test]
fn test_font_from_invalid_bytes_fails() {
    assert!(FontSet::from_bytes(vec![0u8; 16], vec![0u8; 16]).is_err());
}

#[test]
fn test_measure_grows_with_text_and_size() {
    let fonts = load_test_fonts();
    let backend = RasterBackend::new(fonts);
    let surface = backend.surface_from_image(&DynamicImage::ImageRgba8(RgbaImage::new(10, 10)));

    let short = surface.measure_text("Hue", FontSpec::regular(24.0)).unwrap();
    let long = surface.measure_text("Hue Hue", FontSpec::regular(24.0)).unwrap();
    let big = surface.measure_text("Hue", FontSpec::regular(48.0)).unwrap();
    let bold = surface.measure_text("Hue", FontSpec::bold(24.0)).unwrap();
    assert!(long > short);
    assert!(big > short);
    assert!(bold >= short);
    assert_eq!(surface.measure_text("", FontSpec::regular(24.0)).unwrap(), 0.0);
    assert!(surface.measure_text("x", FontSpec::regular(0.0)).is_err());
}

#[test]
fn test_draw_line_is_right_aligned() {
    let fonts = load_test_fonts();
    let backend = RasterBackend::new(fonts);
    let black = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        400,
        100,
        Rgba([0, 0, 0, 255]),
    ));
    let mut surface = backend.surface_from_image(&black);

    surface.draw_line("Saigon", 380.0, 80.0, FontSpec::bold(30.0), Rgba([255, 255, 255, 255]));

    let lit: Vec<(u32, u32)> = surface
        .image()
        .enumerate_pixels()
        .filter(|(_, _, p)| p[0] > 128)
        .map(|(x, y, _)| (x, y))
        .collect();
    assert!(!lit.is_empty());
    assert!(lit.iter().all(|(x, y)| *x <= 382 && *y <= 82));
    // Text sits against the anchor, not the left edge
    assert!(lit.iter().all(|(x, _)| *x > 200));
}

#[test]
fn test_gradient_on_raster_surface() {
    let fonts = load_test_fonts();
    let backend = RasterBackend::new(fonts);
    let white = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        50,
        100,
        Rgba([255, 255, 255, 255]),
    ));
    let mut surface = backend.surface_from_image(&white);
    surface.fill_gradient_rect(60.0, 40.0, &PANEL_GRADIENT);

    assert_eq!(surface.image().get_pixel(10, 10)[0], 255);
    assert!(surface.image().get_pixel(10, 99)[0] < 40);
}

#[test]
fn test_raster_stamp_keeps_dimensions_and_is_deterministic() {
    let fonts = load_test_fonts();
    let compositor = Compositor::new(RasterBackend::new(fonts));
    let source = png_bytes(1000, 750);
    let record = scenario_record();

    let first = compositor.stamp(&source, &record).unwrap();
    let second = compositor.stamp(&source, &record).unwrap();
    assert_eq!(first.bytes, second.bytes);
    assert_eq!((first.width, first.height), (1000, 750));

    let decoded = decode_image(&first.bytes).unwrap();
    assert_eq!(decoded.dimensions(), (1000, 750));
}

#[test]
fn test_source_image_is_not_modified() {
    let fonts = load_test_fonts();
    let compositor = Compositor::new(RasterBackend::new(fonts));
    let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        600,
        400,
        Rgba([90, 140, 200, 255]),
    ));
    let snapshot = source.clone();

    let surface = compositor.backend().surface_from_image(&source);
    let stamped = compositor.composite(surface, &scenario_record()).unwrap();

    assert_eq!(source, snapshot);
    assert!(!stamped.bytes.is_empty());
}

#[test]
fn test_overlay_darkens_bottom_of_image() {
    let fonts = load_test_fonts();
    let compositor = Compositor::new(RasterBackend::new(fonts));
    let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        800,
        600,
        Rgba([220, 220, 220, 255]),
    ));

    let mut surface = compositor.backend().surface_from_image(&source);
    let layout = compositor.paint(&mut surface, &scenario_record()).unwrap();

    // Above the panel is untouched, the left margin of the bottom row is dark
    let above = (layout.panel_top - 5.0) as u32;
    assert_eq!(*surface.image().get_pixel(5, above), Rgba([220, 220, 220, 255]));
    assert!(surface.image().get_pixel(5, 599)[0] < 40);

    let bytes = compositor.backend().encode(&surface, 0.85).unwrap();
    assert!(!bytes.is_empty());
}

#[test]
fn test_long_address_wraps_within_rendered_width() {
    let address = format!("{}Ho Chi Minh", "District ".repeat(21));
    assert_eq!(address.len(), 200);
    let record = CaptureRecord::new(at("2024-03-01T14:05:00+07:00"), "An", "iPhone")
        .with_location(
            Location::new(10.762622, 106.660172, 15.0, at("2024-03-01T14:04:55+07:00"))
                .with_address(address.clone()),
        );

    let compositor = Compositor::new(RasterBackend::new(load_test_fonts()));
    let source = DynamicImage::ImageRgba8(RgbaImage::new(800, 600));
    let surface = compositor.backend().surface_from_image(&source);
    let layout = compositor.layout(&surface, &record).unwrap();
    let max_width = LayoutParams::for_width(800).max_text_width;
    assert_eq!(max_width, 720.0);

    let address_lines: Vec<_> = layout
        .lines
        .iter()
        .filter(|line| line.field == FieldId::Address)
        .collect();
    assert!(address_lines.len() > 1);
    for line in &address_lines {
        let width = surface.measure_text(&line.text, line.font).unwrap();
        assert!(width <= max_width, "{:?} is {} px wide", line.text, width);
    }

    // Placed top-down, the lines read back as the original address
    let mut ordered = address_lines.clone();
    ordered.sort_by(|a, b| a.baseline.total_cmp(&b.baseline));
    let rejoined: Vec<&str> = ordered.iter().map(|line| line.text.as_str()).collect();
    assert_eq!(rejoined.join(" "), address);

    let stamped = compositor.stamp(&png_bytes(800, 600), &record).unwrap();
    assert_eq!((stamped.width, stamped.height), (800, 600));
}

#[test]
fn test_rows_above_panel_are_untouched() {
    let compositor = Compositor::new(RasterBackend::new(load_test_fonts()));
    let fill = Rgba([120, 160, 90, 255]);
    let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1000, 750, fill));

    let mut surface = compositor.backend().surface_from_image(&source);
    let layout = compositor.paint(&mut surface, &scenario_record()).unwrap();

    let panel_top = layout.panel_top.floor() as u32;
    assert!(panel_top > 0);
    assert!(
        surface
            .image()
            .enumerate_pixels()
            .filter(|(_, y, _)| *y < panel_top)
            .all(|(_, _, p)| *p == fill)
    );
}

#[test]
fn test_tiny_images_composite() {
    let compositor = Compositor::new(RasterBackend::new(load_test_fonts()));
    let record = scenario_record();

    for (width, height) in [(1, 1), (3, 2), (50, 20)] {
        let stamped = compositor.stamp(&png_bytes(width, height), &record).unwrap();
        assert_eq!((stamped.width, stamped.height), (width, height));
        let decoded = decode_image(&stamped.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (width, height));
    }
}
