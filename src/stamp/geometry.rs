use super::types::{FontRole, FontSpec};

const MIN_BASE_FONT_SIZE: u32 = 24;
const BASE_FONT_RATIO: f64 = 0.035;
const TIME_FONT_RATIO: f64 = 1.5;
const SMALL_FONT_RATIO: f64 = 0.7;
const PADDING_RATIO: f64 = 1.0;
const TEXT_WIDTH_RATIO: f64 = 0.9;
const TIME_MARGIN_RATIO: f32 = 0.2;

/// Scale-dependent layout constants derived from the source image width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub image_width: u32,
    pub base_font_size: u32,
    pub time_font_size: u32,
    pub small_font_size: u32,
    pub padding: u32,
    pub max_text_width: f32,
}

impl LayoutParams {
    /// Derive layout constants for an image `width` pixels wide.
    ///
    /// Callers must reject zero-width images before calling this.
    pub fn for_width(width: u32) -> Self {
        debug_assert!(width > 0, "layout requires a non-zero width");

        let base = ((width as f64 * BASE_FONT_RATIO).floor() as u32).max(MIN_BASE_FONT_SIZE);
        Self {
            image_width: width,
            base_font_size: base,
            time_font_size: (base as f64 * TIME_FONT_RATIO).floor() as u32,
            small_font_size: (base as f64 * SMALL_FONT_RATIO).floor() as u32,
            padding: (base as f64 * PADDING_RATIO).floor() as u32,
            max_text_width: (width as f64 * TEXT_WIDTH_RATIO) as f32,
        }
    }

    pub fn font_size(&self, role: FontRole) -> u32 {
        match role {
            FontRole::Heading => self.time_font_size,
            FontRole::Body => self.base_font_size,
            FontRole::Small => self.small_font_size,
        }
    }

    pub fn font_spec(&self, role: FontRole) -> FontSpec {
        FontSpec::new(self.font_size(role) as f32, role.weight())
    }

    /// Vertical space reserved for one line in `role`
    pub fn line_height(&self, role: FontRole) -> f32 {
        self.font_size(role) as f32 * role.line_height_factor()
    }

    /// Extra gap kept between the person/device line and the time line
    pub fn time_margin(&self) -> f32 {
        self.base_font_size as f32 * TIME_MARGIN_RATIO
    }

    /// X coordinate every line is right-aligned to
    pub fn anchor_x(&self) -> f32 {
        self.image_width.saturating_sub(self.padding) as f32
    }
}
