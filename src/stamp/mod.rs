// Watermark compositor - derives overlay layout from the image width, wraps
// and stacks metadata lines bottom-up, paints them over a gradient and encodes
pub mod canvas;
pub mod compositor;
pub mod encode;
mod error;
pub mod geometry;
pub mod layout;
pub mod panel;
pub mod raster;
pub mod types;
pub mod wrap;

pub use canvas::{RenderBackend, Surface, TextMeasure};
pub use compositor::{Compositor, DEFAULT_ADDRESS_PLACEHOLDER, DEFAULT_QUALITY, StampedImage};
pub use error::StampError;
pub use geometry::LayoutParams;
pub use layout::{LineDescriptor, PanelLayout, PlacedLine, panel_height, stack_lines};
pub use raster::{FontSet, RasterBackend, RasterSurface};
pub use types::{ColorRole, FieldId, FontRole, FontSpec, FontWeight, GradientStop, PANEL_GRADIENT};
pub use wrap::wrap_text;
