//! Connector drawables and SVG marker generation.
//!
//! An [`Arrow`] is a styled path between two pixel-space points with optional
//! arrowheads. Arrowheads are SVG markers; [`ArrowDrawer`] collects the
//! markers every drawn arrow needs so they can be emitted once in `<defs>`.

use std::{collections::BTreeMap, rc::Rc};

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{StrokeDefinition, SvgNode},
    geometry::{Bounds, Point},
};

/// Shape of the path between the two endpoints.
///
/// - `Straight`: a single segment
/// - `Curved`: a cubic bezier arc
/// - `Orthogonal`: horizontal and vertical segments only
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ArrowStyle {
    #[default]
    Straight,
    Curved,
    Orthogonal,
}

/// Where arrowheads are drawn.
///
/// - `Forward`: head at the destination
/// - `Backward`: head at the source
/// - `Bidirectional`: heads at both ends
/// - `Plain`: no heads
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    #[default]
    Forward,
    Backward,
    Bidirectional,
    Plain,
}

impl ArrowDirection {
    pub fn has_source_head(self) -> bool {
        matches!(self, Self::Backward | Self::Bidirectional)
    }

    pub fn has_destination_head(self) -> bool {
        matches!(self, Self::Forward | Self::Bidirectional)
    }
}

/// Stroke and path style of an arrow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrowDefinition {
    stroke: StrokeDefinition,
    style: ArrowStyle,
}

impl ArrowDefinition {
    pub fn new(stroke: StrokeDefinition) -> Self {
        Self {
            stroke,
            style: ArrowStyle::default(),
        }
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn style(&self) -> ArrowStyle {
        self.style
    }

    pub fn set_style(&mut self, style: ArrowStyle) {
        self.style = style;
    }

    pub fn set_stroke(&mut self, stroke: StrokeDefinition) {
        self.stroke = stroke;
    }
}

/// A drawable arrow: a definition plus the direction of its heads.
#[derive(Debug, Clone)]
pub struct Arrow {
    definition: Rc<ArrowDefinition>,
    direction: ArrowDirection,
}

impl Arrow {
    pub fn new(definition: Rc<ArrowDefinition>, direction: ArrowDirection) -> Self {
        Self {
            definition,
            direction,
        }
    }

    pub fn definition(&self) -> &ArrowDefinition {
        &self.definition
    }

    pub fn direction(&self) -> ArrowDirection {
        self.direction
    }

    /// Points where arrowhead tips are drawn, source first.
    pub fn head_points(&self, source: Point, destination: Point) -> Vec<Point> {
        let mut heads = Vec::with_capacity(2);
        if self.direction.has_source_head() {
            heads.push(source);
        }
        if self.direction.has_destination_head() {
            heads.push(destination);
        }
        heads
    }

    /// Box enclosing the stroked path from `source` to `destination`.
    ///
    /// Straight and orthogonal paths stay inside the box spanned by their
    /// endpoints; a curved path is measured at its extrema.
    pub fn path_bounds(&self, source: Point, destination: Point) -> Bounds {
        let corners = Bounds::from_corners(source, destination);
        match self.definition.style() {
            ArrowStyle::Straight | ArrowStyle::Orthogonal => corners,
            ArrowStyle::Curved => {
                let (ctrl1, ctrl2) = curve_controls(source, destination);
                let (min_x, max_x) =
                    cubic_extent(source.x(), ctrl1.x(), ctrl2.x(), destination.x());
                let (min_y, max_y) =
                    cubic_extent(source.y(), ctrl1.y(), ctrl2.y(), destination.y());
                Bounds::from_corners(Point::new(min_x, min_y), Point::new(max_x, max_y))
            }
        }
    }

    fn render_to_svg(&self, source: Point, destination: Point) -> SvgNode {
        let path_data = path_data_for_style(source, destination, self.definition.style());
        let color = self.definition.stroke().color();

        let path = svg_element::Path::new()
            .set("d", path_data)
            .set("fill", "none");
        let mut path = crate::apply_stroke!(path, self.definition.stroke());

        if self.direction.has_source_head() {
            path = path.set("marker-start", format!("url(#{})", marker_start_id(color)));
        }
        if self.direction.has_destination_head() {
            path = path.set("marker-end", format!("url(#{})", marker_end_id(color)));
        }

        Box::new(path)
    }
}

/// Draws arrows and remembers which arrowhead markers they reference.
///
/// Markers are keyed by id in ordered maps so the emitted `<defs>` are
/// identical across runs.
#[derive(Debug, Default)]
pub struct ArrowDrawer {
    start_markers: BTreeMap<String, Color>,
    end_markers: BTreeMap<String, Color>,
}

impl ArrowDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `arrow` from `source` to `destination` and registers its markers.
    pub fn draw_arrow(&mut self, arrow: &Arrow, source: Point, destination: Point) -> SvgNode {
        let color = arrow.definition.stroke().color();
        if arrow.direction.has_source_head() {
            self.start_markers.insert(marker_start_id(color), color);
        }
        if arrow.direction.has_destination_head() {
            self.end_markers.insert(marker_end_id(color), color);
        }
        arrow.render_to_svg(source, destination)
    }

    /// Number of distinct markers registered so far.
    pub fn marker_count(&self) -> usize {
        self.start_markers.len() + self.end_markers.len()
    }

    /// Emits a `<defs>` element holding every registered marker.
    pub fn draw_marker_definitions(&self) -> SvgNode {
        let mut defs = svg_element::Definitions::new();
        for color in self.start_markers.values() {
            defs = defs.add(create_start_marker(*color));
        }
        for color in self.end_markers.values() {
            defs = defs.add(create_end_marker(*color));
        }
        defs.into()
    }
}

fn marker_start_id(color: Color) -> String {
    format!("arrow-start-{}", color.to_id_safe_string())
}

fn marker_end_id(color: Color) -> String {
    format!("arrow-end-{}", color.to_id_safe_string())
}

fn path_data_for_style(start: Point, end: Point, style: ArrowStyle) -> String {
    match style {
        ArrowStyle::Straight => straight_path_data(start, end),
        ArrowStyle::Curved => curved_path_data(start, end),
        ArrowStyle::Orthogonal => orthogonal_path_data(start, end),
    }
}

fn straight_path_data(start: Point, end: Point) -> String {
    format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y())
}

/// Control points that bow a cubic bezier away from the chord.
fn curve_controls(start: Point, end: Point) -> (Point, Point) {
    let delta = end.sub_point(start);
    (
        Point::new(start.x() + delta.x() / 4.0, start.y() - delta.y() / 2.0),
        Point::new(end.x() - delta.x() / 4.0, end.y() + delta.y() / 2.0),
    )
}

/// Range covered on one axis by a cubic bezier with coordinates `p0..p3`.
fn cubic_extent(p0: f32, p1: f32, p2: f32, p3: f32) -> (f32, f32) {
    let at = |t: f32| {
        let u = 1.0 - t;
        u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
    };

    // Roots of the derivative a·t² + b·t + c
    let a = 3.0 * (-p0 + 3.0 * p1 - 3.0 * p2 + p3);
    let b = 6.0 * (p0 - 2.0 * p1 + p2);
    let c = 3.0 * (p1 - p0);
    let mut roots = Vec::with_capacity(2);
    if a.abs() <= f32::EPSILON {
        if b.abs() > f32::EPSILON {
            roots.push(-c / b);
        }
    } else {
        let discriminant = b * b - 4.0 * a * c;
        if discriminant >= 0.0 {
            let sqrt = discriminant.sqrt();
            roots.push((-b + sqrt) / (2.0 * a));
            roots.push((-b - sqrt) / (2.0 * a));
        }
    }

    roots
        .into_iter()
        .filter(|t| *t > 0.0 && *t < 1.0)
        .map(at)
        .fold((p0.min(p3), p0.max(p3)), |(min, max), value| {
            (min.min(value), max.max(value))
        })
}

fn curved_path_data(start: Point, end: Point) -> String {
    let (ctrl1, ctrl2) = curve_controls(start, end);

    format!(
        "M {} {} C {} {}, {} {}, {} {}",
        start.x(),
        start.y(),
        ctrl1.x(),
        ctrl1.y(),
        ctrl2.x(),
        ctrl2.y(),
        end.x(),
        end.y()
    )
}

/// Three axis-aligned segments, leading with the dominant axis.
fn orthogonal_path_data(start: Point, end: Point) -> String {
    let delta = end.sub_point(start);
    let mid = start.midpoint(end);

    let (first, second) = if delta.x().abs() > delta.y().abs() {
        (Point::new(mid.x(), start.y()), Point::new(mid.x(), end.y()))
    } else {
        (Point::new(start.x(), mid.y()), Point::new(end.x(), mid.y()))
    };

    format!(
        "M {} {} L {} {} L {} {} L {} {}",
        start.x(),
        start.y(),
        first.x(),
        first.y(),
        second.x(),
        second.y(),
        end.x(),
        end.y()
    )
}

// The triangle tip sits on the marker's reference point, so the tip lands
// exactly on the path endpoint.
fn create_end_marker(color: Color) -> svg_element::Marker {
    svg_element::Marker::new()
        .set("id", marker_end_id(color))
        .set("viewBox", "0 0 10 10")
        .set("refX", 10)
        .set("refY", 5)
        .set("markerWidth", 6)
        .set("markerHeight", 6)
        .set("orient", "auto")
        .add(
            svg_element::Path::new()
                .set("d", "M 0 0 L 10 5 L 0 10 z")
                .set("fill", color.to_paint_string())
                .set("fill-opacity", color.alpha()),
        )
}

fn create_start_marker(color: Color) -> svg_element::Marker {
    svg_element::Marker::new()
        .set("id", marker_start_id(color))
        .set("viewBox", "0 0 10 10")
        .set("refX", 0)
        .set("refY", 5)
        .set("markerWidth", 6)
        .set("markerHeight", 6)
        .set("orient", "auto")
        .add(
            svg_element::Path::new()
                .set("d", "M 10 0 L 0 5 L 10 10 z")
                .set("fill", color.to_paint_string())
                .set("fill-opacity", color.alpha()),
        )
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn arrow(direction: ArrowDirection, color: &str) -> Arrow {
        let stroke = StrokeDefinition::solid(Color::new(color).unwrap(), 2.0);
        Arrow::new(Rc::new(ArrowDefinition::new(stroke)), direction)
    }

    #[test]
    fn test_head_points_follow_direction() {
        let source = Point::new(0.0, 0.0);
        let destination = Point::new(1000.0, 0.0);

        assert_eq!(
            arrow(ArrowDirection::Forward, "black").head_points(source, destination),
            vec![destination]
        );
        assert_eq!(
            arrow(ArrowDirection::Backward, "black").head_points(source, destination),
            vec![source]
        );
        assert_eq!(
            arrow(ArrowDirection::Bidirectional, "black").head_points(source, destination),
            vec![source, destination]
        );
        assert!(
            arrow(ArrowDirection::Plain, "black")
                .head_points(source, destination)
                .is_empty()
        );
    }

    #[test]
    fn test_draw_arrow_references_registered_marker() {
        let mut drawer = ArrowDrawer::new();
        let rendered = drawer
            .draw_arrow(
                &arrow(ArrowDirection::Forward, "red"),
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
            )
            .to_string();

        assert!(rendered.contains("d=\"M 0 0 L 100 0\""));
        assert!(rendered.contains("marker-end=\"url(#arrow-end-red)\""));
        assert!(!rendered.contains("marker-start"));

        let defs = drawer.draw_marker_definitions().to_string();
        assert!(defs.contains("id=\"arrow-end-red\""));
        assert_eq!(drawer.marker_count(), 1);
    }

    #[test]
    fn test_markers_are_shared_and_ordered() {
        let mut drawer = ArrowDrawer::new();
        let (a, b) = (Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        drawer.draw_arrow(&arrow(ArrowDirection::Forward, "red"), a, b);
        drawer.draw_arrow(&arrow(ArrowDirection::Forward, "red"), b, a);
        drawer.draw_arrow(&arrow(ArrowDirection::Bidirectional, "blue"), a, b);
        drawer.draw_arrow(&arrow(ArrowDirection::Plain, "green"), a, b);

        assert_eq!(drawer.marker_count(), 3);
        let defs = drawer.draw_marker_definitions().to_string();
        let blue = defs.find("arrow-end-blue").unwrap();
        let red = defs.find("arrow-end-red").unwrap();
        assert!(blue < red);
        assert!(!defs.contains("green"));
    }

    #[test]
    fn test_orthogonal_path_leads_with_dominant_axis() {
        let wide = orthogonal_path_data(Point::new(0.0, 0.0), Point::new(100.0, 20.0));
        assert_eq!(wide, "M 0 0 L 50 0 L 50 20 L 100 20");

        let tall = orthogonal_path_data(Point::new(0.0, 0.0), Point::new(20.0, 100.0));
        assert_eq!(tall, "M 0 0 L 0 50 L 20 50 L 20 100");
    }

    #[test]
    fn test_curved_path_bounds_cover_the_bow() {
        let mut def = ArrowDefinition::new(StrokeDefinition::solid(Color::default(), 2.0));
        def.set_style(ArrowStyle::Curved);
        let curved = Arrow::new(Rc::new(def), ArrowDirection::Forward);

        // Vertical edge drawn downward: the curve bulges above the source
        // and below the destination
        let (source, destination) = (Point::new(100.0, 100.0), Point::new(100.0, 300.0));
        let bounds = curved.path_bounds(source, destination);
        let corners = Bounds::from_corners(source, destination);
        assert!(bounds.min_y() < corners.min_y());
        assert!(bounds.max_y() > corners.max_y());
        assert_approx_eq!(f32, bounds.min_y(), 83.81, epsilon = 0.01);
        assert_approx_eq!(f32, bounds.max_y(), 316.19, epsilon = 0.01);
        assert_approx_eq!(f32, bounds.width(), 0.0);

        let straight = arrow(ArrowDirection::Forward, "black");
        assert_eq!(straight.path_bounds(source, destination), corners);
    }

    #[test]
    fn test_cubic_extent_of_monotonic_curve_is_endpoints() {
        let (min, max) = cubic_extent(0.0, 10.0, 20.0, 30.0);
        assert_approx_eq!(f32, min, 0.0);
        assert_approx_eq!(f32, max, 30.0);
    }

    #[test]
    fn test_curved_path_ends_at_endpoints() {
        let data = curved_path_data(Point::new(0.0, 0.0), Point::new(40.0, 80.0));
        assert!(data.starts_with("M 0 0 C"));
        assert!(data.ends_with("40 80"));
    }
}
