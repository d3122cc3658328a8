//! Provides `PositionedDrawable`, a drawable pinned to an absolute position.

use crate::{
    draw::{Drawable, SvgNode},
    geometry::{Bounds, Point},
};

/// A drawable object together with the pixel position of its center.
#[derive(Debug, Clone)]
pub struct PositionedDrawable<D: Drawable> {
    drawable: D,
    position: Point,
}

impl<D: Drawable> PositionedDrawable<D> {
    /// Wraps a drawable at the origin.
    pub fn new(drawable: D) -> Self {
        Self {
            drawable,
            position: Point::default(),
        }
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Renders the drawable at its stored position.
    pub fn render(&self) -> SvgNode {
        self.drawable.render_to_svg(self.position)
    }

    /// Outer bounds of the drawable around its stored position.
    pub fn bounds(&self) -> Bounds {
        self.position.to_bounds(self.drawable.size())
    }

    pub fn position(&self) -> Point {
        self.position
    }
}
