use tracing::{debug, info};

use super::canvas::{RenderBackend, Surface, TextMeasure};
use super::error::StampError;
use super::geometry::LayoutParams;
use super::layout::{LineDescriptor, PanelLayout, stack_lines};
use super::types::{ColorRole, FieldId, FontRole, PANEL_GRADIENT};
use super::wrap::wrap_text;
use crate::record::CaptureRecord;

/// Text shown in place of the address until reverse geocoding completes
pub const DEFAULT_ADDRESS_PLACEHOLDER: &str = "Resolving address...";

/// Lossy export quality on a 0.0..=1.0 scale
pub const DEFAULT_QUALITY: f32 = 0.85;

/// Encoded output of one compositor run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl StampedImage {
    pub const MIME_TYPE: &'static str = "image/jpeg";
}

/// Stamps capture metadata onto images. Holds no per-image state: every call
/// works on its own freshly decoded surface.
#[derive(Debug, Clone)]
pub struct Compositor<B> {
    backend: B,
    quality: f32,
    address_placeholder: String,
}

impl<B: RenderBackend> Compositor<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            quality: DEFAULT_QUALITY,
            address_placeholder: DEFAULT_ADDRESS_PLACEHOLDER.to_string(),
        }
    }

    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_address_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.address_placeholder = placeholder.into();
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn quality(&self) -> f32 {
        self.quality
    }

    /// Overlay lines for `record` in bottom-up order, with the address wrapped
    /// to the available width.
    pub fn overlay_lines<M: TextMeasure + ?Sized>(
        &self,
        measure: &M,
        record: &CaptureRecord,
        params: &LayoutParams,
    ) -> Result<Vec<LineDescriptor>, StampError> {
        let address = wrap_text(
            measure,
            record.address_text(&self.address_placeholder),
            params.font_spec(FontRole::Body),
            params.max_text_width,
        )?;

        let mut lines = Vec::with_capacity(address.len() + 3);
        lines.push(LineDescriptor::new(
            FieldId::Coordinates,
            record.coordinates_text(),
            FontRole::Small,
            ColorRole::Muted,
        ));
        // Last wrapped line sits lowest
        lines.extend(address.into_iter().rev().map(|line| {
            LineDescriptor::new(FieldId::Address, line, FontRole::Body, ColorRole::Primary)
        }));
        lines.push(LineDescriptor::new(
            FieldId::PersonDevice,
            record.person_device_text(),
            FontRole::Small,
            ColorRole::Accent,
        ));
        lines.push(
            LineDescriptor::new(
                FieldId::Time,
                record.time_text(),
                FontRole::Heading,
                ColorRole::Highlight,
            )
            .with_lead(params.time_margin()),
        );
        Ok(lines)
    }

    /// Compute the overlay layout for `surface` without painting anything.
    pub fn layout<S: Surface + ?Sized>(
        &self,
        surface: &S,
        record: &CaptureRecord,
    ) -> Result<PanelLayout, StampError> {
        let (width, height) = surface.dimensions();
        if width == 0 || height == 0 {
            return Err(StampError::EmptySurface { width, height });
        }

        let params = LayoutParams::for_width(width);
        debug!(
            "Layout for {}x{}: base={} time={} small={} padding={}",
            width,
            height,
            params.base_font_size,
            params.time_font_size,
            params.small_font_size,
            params.padding
        );

        let lines = self.overlay_lines(surface, record, &params)?;
        Ok(stack_lines(&lines, &params, height))
    }

    /// Paint the gradient panel and every overlay line onto `surface`.
    pub fn paint(
        &self,
        surface: &mut B::Surface,
        record: &CaptureRecord,
    ) -> Result<PanelLayout, StampError> {
        let layout = self.layout(&*surface, record)?;

        surface.fill_gradient_rect(layout.panel_top, layout.panel_height, &PANEL_GRADIENT);
        for line in &layout.lines {
            surface.draw_line(&line.text, line.right_x, line.baseline, line.font, line.color);
        }

        debug!(
            "Painted {} overlay lines in a {:.1}px panel",
            layout.lines.len(),
            layout.panel_height
        );
        Ok(layout)
    }

    /// Paint and encode an already decoded surface.
    pub fn composite(
        &self,
        mut surface: B::Surface,
        record: &CaptureRecord,
    ) -> Result<StampedImage, StampError> {
        self.paint(&mut surface, record)?;

        let (width, height) = surface.dimensions();
        let bytes = self.backend.encode(&surface, self.quality)?;
        info!(
            capture_id = %record.id,
            "Stamped {}x{} capture ({} bytes)",
            width,
            height,
            bytes.len()
        );
        Ok(StampedImage {
            bytes,
            width,
            height,
        })
    }

    /// Decode `source` and stamp it.
    pub fn stamp(&self, source: &[u8], record: &CaptureRecord) -> Result<StampedImage, StampError> {
        let surface = self.backend.decode(source)?;
        self.composite(surface, record)
    }

    /// Like [`Compositor::stamp`], decoding on the blocking thread pool first.
    pub async fn stamp_async(
        &self,
        source: Vec<u8>,
        record: &CaptureRecord,
    ) -> Result<StampedImage, StampError>
    where
        B: Clone + Send + 'static,
        B::Surface: Send + 'static,
    {
        let backend = self.backend.clone();
        let surface = tokio::task::spawn_blocking(move || backend.decode(&source)).await??;
        self.composite(surface, record)
    }
}
