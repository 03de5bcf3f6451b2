use image::Rgba;

use super::geometry::LayoutParams;
use super::types::{ColorRole, FieldId, FontRole, FontSpec};

/// One overlay line before placement.
#[derive(Debug, Clone, PartialEq)]
pub struct LineDescriptor {
    pub field: FieldId,
    pub text: String,
    pub role: FontRole,
    pub color: ColorRole,
    /// Extra space reserved beneath the line, on top of its line height
    pub lead: f32,
}

impl LineDescriptor {
    pub fn new(field: FieldId, text: impl Into<String>, role: FontRole, color: ColorRole) -> Self {
        Self {
            field,
            text: text.into(),
            role,
            color,
            lead: 0.0,
        }
    }

    pub fn with_lead(mut self, lead: f32) -> Self {
        self.lead = lead;
        self
    }

    /// Total vertical space this line claims in the stack
    pub fn slot_height(&self, params: &LayoutParams) -> f32 {
        params.line_height(self.role) + self.lead
    }
}

/// A line with its final position on the image.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub field: FieldId,
    pub text: String,
    pub font: FontSpec,
    pub color: Rgba<u8>,
    pub right_x: f32,
    pub baseline: f32,
    pub slot_top: f32,
    pub slot_bottom: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    /// Top edge of the gradient panel; negative when the panel is taller than the image
    pub panel_top: f32,
    pub panel_height: f32,
    /// Lines in bottom-up order
    pub lines: Vec<PlacedLine>,
}

/// Total panel height for `descriptors`: every reserved slot plus padding above and below.
pub fn panel_height(descriptors: &[LineDescriptor], params: &LayoutParams) -> f32 {
    let content: f32 = descriptors.iter().map(|d| d.slot_height(params)).sum();
    content + 2.0 * params.padding as f32
}

/// Stack `descriptors` (given bottom-up) against the bottom edge of an image
/// `image_height` pixels tall, right-aligned to `params.anchor_x()`.
pub fn stack_lines(
    descriptors: &[LineDescriptor],
    params: &LayoutParams,
    image_height: u32,
) -> PanelLayout {
    let height = panel_height(descriptors, params);
    let panel_top = image_height as f32 - height;
    let right_x = params.anchor_x();

    let mut cursor = image_height as f32 - params.padding as f32;
    let mut lines = Vec::with_capacity(descriptors.len());

    for descriptor in descriptors {
        let slot_bottom = cursor;
        cursor -= descriptor.slot_height(params);
        lines.push(PlacedLine {
            field: descriptor.field,
            text: descriptor.text.clone(),
            font: params.font_spec(descriptor.role),
            color: descriptor.color.rgba(),
            right_x,
            baseline: slot_bottom - descriptor.lead,
            slot_top: cursor,
            slot_bottom,
        });
    }

    PanelLayout {
        panel_top,
        panel_height: height,
        lines,
    }
}
