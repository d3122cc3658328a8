//! The rendered form of a scene.
//!
//! A [`Surface`] holds the drawn SVG content together with the geometry that
//! was drawn, in scene units, so callers can inspect positions without
//! parsing SVG.

use svg::node::element as svg_element;

use blueprint_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
};

use crate::layout::LayoutWarning;

/// Maps scene coordinates (y-up, abstract units) to pixels (y-down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    canvas: Size,
    pixels_per_unit: f32,
}

impl Viewport {
    pub fn new(canvas: Size, pixels_per_unit: f32) -> Self {
        Self {
            canvas,
            pixels_per_unit,
        }
    }

    pub fn pixels_per_unit(&self) -> f32 {
        self.pixels_per_unit
    }

    /// Canvas size in pixels.
    pub fn canvas_px(&self) -> Size {
        self.canvas.scale(self.pixels_per_unit)
    }

    pub fn to_px(&self, point: Point) -> Point {
        Point::new(
            point.x() * self.pixels_per_unit,
            (self.canvas.height() - point.y()) * self.pixels_per_unit,
        )
    }

    pub fn to_scene(&self, point: Point) -> Point {
        Point::new(
            point.x() / self.pixels_per_unit,
            self.canvas.height() - point.y() / self.pixels_per_unit,
        )
    }

    /// Converts a scene-unit offset to a pixel offset, flipping y.
    pub fn offset_to_px(&self, offset: Point) -> Point {
        Point::new(
            offset.x() * self.pixels_per_unit,
            -offset.y() * self.pixels_per_unit,
        )
    }

    pub fn length_to_px(&self, length: f32) -> f32 {
        length * self.pixels_per_unit
    }

    /// Converts typographic points to pixels.
    pub fn points_to_px(&self, points: f32) -> f32 {
        points * self.pixels_per_unit / 72.0
    }

    pub fn bounds_to_px(&self, bounds: Bounds) -> Bounds {
        Bounds::from_corners(self.to_px(bounds.min_point()), self.to_px(max_point(bounds)))
    }

    pub fn bounds_to_scene(&self, bounds: Bounds) -> Bounds {
        Bounds::from_corners(
            self.to_scene(bounds.min_point()),
            self.to_scene(max_point(bounds)),
        )
    }
}

fn max_point(bounds: Bounds) -> Point {
    Point::new(bounds.max_x(), bounds.max_y())
}

/// A node as drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedNode {
    pub id: String,
    /// Nominal box, `anchor ± size / 2`.
    pub bounds: Bounds,
    /// Drawn outline, including the style pad.
    pub outline: Bounds,
}

/// An edge as drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEdge {
    pub source: Point,
    pub destination: Point,
    /// Arrowhead tip positions.
    pub heads: Vec<Point>,
    pub label_bounds: Option<Bounds>,
}

/// A rendered scene, ready for export.
#[derive(Debug, Clone)]
pub struct Surface {
    pub(crate) viewport: Viewport,
    pub(crate) background: Color,
    pub(crate) content: svg_element::Group,
    pub(crate) nodes: Vec<RenderedNode>,
    pub(crate) edges: Vec<RenderedEdge>,
    pub(crate) legend_bounds: Option<Bounds>,
    pub(crate) annotation_bounds: Vec<Bounds>,
    pub(crate) content_bounds: Bounds,
    pub(crate) warnings: Vec<LayoutWarning>,
}

impl Surface {
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The scene's background color.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Drawn nodes, in scene order.
    pub fn nodes(&self) -> &[RenderedNode] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&RenderedNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Drawn edges, in scene order.
    pub fn edges(&self) -> &[RenderedEdge] {
        &self.edges
    }

    /// Bounds of the legend block, if the scene has legend entries.
    pub fn legend_bounds(&self) -> Option<Bounds> {
        self.legend_bounds
    }

    /// Bounds of each annotation block, in scene order.
    pub fn annotation_bounds(&self) -> &[Bounds] {
        &self.annotation_bounds
    }

    /// Union of everything drawn, in scene units.
    pub fn content_bounds(&self) -> Bounds {
        self.content_bounds
    }

    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }

    pub(crate) fn content(&self) -> &svg_element::Group {
        &self.content
    }
}
