//! Drawable components for diagram rendering.
//!
//! Every component implements [`Drawable`], which renders it centered on a
//! pixel-space position and reports its size. Pixel space is y-down, like SVG.
mod arrow;
mod arrow_with_text;
mod layer;
mod positioned;
mod shape;
mod shape_with_text;
mod stroke;
mod text;

pub use arrow::{Arrow, ArrowDefinition, ArrowDirection, ArrowDrawer, ArrowStyle};
pub use arrow_with_text::ArrowWithText;
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use positioned::PositionedDrawable;
pub use shape::{BoxDefinition, RoundedBox};
pub use shape_with_text::LabeledBox;
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{FontSlant, FontWeight, Text, TextAlign, TextDefinition, TextLayout, TextMeasurer};

use crate::geometry::{Point, Size};

pub trait Drawable: std::fmt::Debug {
    fn render_to_svg(&self, position: Point) -> SvgNode;
    fn size(&self) -> Size;
}
