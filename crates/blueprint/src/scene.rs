//! The scene model: everything one diagram contains.
//!
//! A [`Scene`] owns its [`Node`]s, [`Edge`]s, [`LegendEntry`]s and
//! [`AnnotationBox`]es in insertion order. Coordinates are abstract scene
//! units with the origin at the bottom-left corner of the canvas, x growing
//! right and y growing up.
//!
//! ```
//! # use blueprint::{Scene, Node, Edge, EdgeEnd};
//! # use blueprint_core::geometry::{Point, Size};
//! let mut scene = Scene::new(16.0, 14.0)?;
//! scene.add_node(Node::new("customer", Point::new(8.0, 12.5), Size::new(3.0, 0.6)))?;
//! scene.add_node(Node::new("orchestrator", Point::new(8.0, 10.5), Size::new(3.5, 0.8)))?;
//! scene.add_edge(Edge::new(
//!     EdgeEnd::boundary("customer"),
//!     EdgeEnd::boundary("orchestrator"),
//! ))?;
//! scene.freeze();
//! assert!(scene.add_node(Node::new("late", Point::new(1.0, 1.0), Size::new(1.0, 1.0))).is_err());
//! # Ok::<(), blueprint::BlueprintError>(())
//! ```

use indexmap::IndexMap;
use log::{debug, trace};

use blueprint_core::{
    color::Color,
    draw::{ArrowDirection, ArrowStyle, FontWeight, StrokeStyle},
    geometry::{Bounds, Point, Size},
};

use crate::{error::BlueprintError, layout};

/// Visual style of a [`Node`].
///
/// Border width and font size are in points; corner radius and pad are in
/// scene units.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    pub fill: Color,
    pub border_color: Color,
    pub border_width: f32,
    pub corner_radius: f32,
    /// Distance the drawn outline sits outside the nominal box.
    pub pad: f32,
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub text_color: Color,
}

impl NodeStyle {
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_border(mut self, color: Color, width: f32) -> Self {
        self.border_color = color;
        self.border_width = width;
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_pad(mut self, pad: f32) -> Self {
        self.pad = pad;
        self
    }
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            fill: Color::white(),
            border_color: Color::default(),
            border_width: 1.5,
            corner_radius: 0.1,
            pad: 0.1,
            font_size: 9.0,
            font_weight: FontWeight::Normal,
            text_color: Color::default(),
        }
    }
}

/// A labeled box at a fixed anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    anchor: Point,
    size: Size,
    label: String,
    style: NodeStyle,
}

impl Node {
    /// Creates an unlabeled node centered on `anchor`.
    pub fn new(id: impl Into<String>, anchor: Point, size: Size) -> Self {
        Self {
            id: id.into(),
            anchor,
            size,
            label: String::new(),
            style: NodeStyle::default(),
        }
    }

    /// Sets the label. `\n` starts a new line.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    /// Nominal bounds: exactly `anchor ± size / 2`, ignoring the style pad.
    pub fn bounds(&self) -> Bounds {
        self.anchor.to_bounds(self.size)
    }

    fn validate(&self) -> Result<(), BlueprintError> {
        let reason = if self.id.is_empty() {
            Some("identifier must not be empty".to_string())
        } else if !self.anchor.is_finite() {
            Some("anchor must be finite".to_string())
        } else if !self.size.is_positive() {
            Some(format!(
                "width and height must be positive, got {}x{}",
                self.size.width(),
                self.size.height()
            ))
        } else if !is_positive_length(self.style.font_size) {
            Some(format!(
                "font size must be positive, got {}",
                self.style.font_size
            ))
        } else if !(self.style.border_width.is_finite() && self.style.border_width >= 0.0) {
            Some(format!(
                "border width must not be negative, got {}",
                self.style.border_width
            ))
        } else {
            None
        };

        match reason {
            Some(reason) => Err(BlueprintError::InvalidNode {
                id: self.id.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

/// How a node-referenced endpoint is derived from its node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    /// The node's anchor plus the offset.
    #[default]
    Center,
    /// Where the segment toward the opposite endpoint leaves the node's box.
    Boundary,
}

/// Reference to a node, used as an edge endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRef {
    id: String,
    offset: Point,
    attachment: Attachment,
}

impl NodeRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            offset: Point::default(),
            attachment: Attachment::default(),
        }
    }

    /// Shifts the endpoint away from the anchor, in scene units.
    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = attachment;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn attachment(&self) -> Attachment {
        self.attachment
    }
}

/// One end of an [`Edge`].
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeEnd {
    /// A literal point in scene units.
    Point(Point),
    /// A point derived from a node.
    Node(NodeRef),
}

impl EdgeEnd {
    /// The center of the node `id`.
    pub fn node(id: impl Into<String>) -> Self {
        Self::Node(NodeRef::new(id))
    }

    /// The edge of the node `id`, facing the opposite endpoint.
    pub fn boundary(id: impl Into<String>) -> Self {
        Self::Node(NodeRef::new(id).with_attachment(Attachment::Boundary))
    }

    /// The referenced node id, if any.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            Self::Point(_) => None,
            Self::Node(node) => Some(node.id()),
        }
    }
}

impl From<Point> for EdgeEnd {
    fn from(point: Point) -> Self {
        Self::Point(point)
    }
}

impl From<NodeRef> for EdgeEnd {
    fn from(node: NodeRef) -> Self {
        Self::Node(node)
    }
}

/// A connector between two endpoints.
///
/// Line width is in points; the label offset is in scene units.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    source: EdgeEnd,
    destination: EdgeEnd,
    direction: ArrowDirection,
    path_style: ArrowStyle,
    label: Option<String>,
    label_offset: Option<Point>,
    color: Color,
    line_width: f32,
    line_style: StrokeStyle,
}

impl Edge {
    /// Creates a black, single-headed straight edge.
    pub fn new(source: impl Into<EdgeEnd>, destination: impl Into<EdgeEnd>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            direction: ArrowDirection::Forward,
            path_style: ArrowStyle::Straight,
            label: None,
            label_offset: None,
            color: Color::default(),
            line_width: 1.5,
            line_style: StrokeStyle::Solid,
        }
    }

    pub fn with_direction(mut self, direction: ArrowDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_path_style(mut self, style: ArrowStyle) -> Self {
        self.path_style = style;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Overrides the configured label offset from the edge midpoint.
    pub fn with_label_offset(mut self, offset: Point) -> Self {
        self.label_offset = Some(offset);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_line_style(mut self, style: StrokeStyle) -> Self {
        self.line_style = style;
        self
    }

    pub fn source(&self) -> &EdgeEnd {
        &self.source
    }

    pub fn destination(&self) -> &EdgeEnd {
        &self.destination
    }

    pub fn direction(&self) -> ArrowDirection {
        self.direction
    }

    pub fn path_style(&self) -> ArrowStyle {
        self.path_style
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn label_offset(&self) -> Option<Point> {
        self.label_offset
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn line_style(&self) -> &StrokeStyle {
        &self.line_style
    }
}

/// A legend swatch and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    swatch: Color,
    border: Color,
    label: String,
}

impl LegendEntry {
    /// Creates an entry with a black swatch border.
    pub fn new(label: impl Into<String>, swatch: Color) -> Self {
        Self {
            swatch,
            border: Color::default(),
            label: label.into(),
        }
    }

    pub fn with_border(mut self, border: Color) -> Self {
        self.border = border;
        self
    }

    pub fn swatch(&self) -> Color {
        self.swatch
    }

    pub fn border(&self) -> Color {
        self.border
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    /// The block starts at the anchor and extends right.
    Left,
    #[default]
    Center,
    /// The block ends at the anchor.
    Right,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    /// The block hangs below the anchor.
    Top,
    #[default]
    Center,
    /// The block sits on top of the anchor.
    Bottom,
}

/// Style of an [`AnnotationBox`].
///
/// Font size, padding and corner radius are in points.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationStyle {
    /// Panel fill; its alpha is the panel opacity. `None` draws bare text.
    pub background: Option<Color>,
    pub padding: f32,
    /// Use the configured monospace family instead of the default one.
    pub monospace: bool,
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub text_color: Color,
    pub corner_radius: f32,
}

impl AnnotationStyle {
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_monospace(mut self, monospace: bool) -> Self {
        self.monospace = monospace;
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            background: None,
            padding: 0.0,
            monospace: false,
            font_size: 10.0,
            font_weight: FontWeight::Normal,
            text_color: Color::default(),
            corner_radius: 0.0,
        }
    }
}

/// A free-standing block of text, such as a title or a notes panel.
///
/// Lines are taken literally: the text is split on `\n` and never reflowed.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationBox {
    text: String,
    anchor: Point,
    style: AnnotationStyle,
    h_align: HorizontalAlign,
    v_align: VerticalAlign,
}

impl AnnotationBox {
    /// Creates a block centered on `anchor`.
    pub fn new(text: impl Into<String>, anchor: Point) -> Self {
        Self {
            text: text.into(),
            anchor,
            style: AnnotationStyle::default(),
            h_align: HorizontalAlign::default(),
            v_align: VerticalAlign::default(),
        }
    }

    pub fn with_style(mut self, style: AnnotationStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_alignment(mut self, h_align: HorizontalAlign, v_align: VerticalAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn style(&self) -> &AnnotationStyle {
        &self.style
    }

    pub fn h_align(&self) -> HorizontalAlign {
        self.h_align
    }

    pub fn v_align(&self) -> VerticalAlign {
        self.v_align
    }

    fn validate(&self) -> Result<(), BlueprintError> {
        if !self.anchor.is_finite() {
            return Err(BlueprintError::InvalidScene(
                "annotation anchor must be finite".to_string(),
            ));
        }
        if !is_positive_length(self.style.font_size) {
            return Err(BlueprintError::InvalidScene(format!(
                "annotation font size must be positive, got {}",
                self.style.font_size
            )));
        }
        if !(self.style.padding.is_finite() && self.style.padding >= 0.0) {
            return Err(BlueprintError::InvalidScene(format!(
                "annotation padding must not be negative, got {}",
                self.style.padding
            )));
        }
        Ok(())
    }
}

/// Which side of the canvas the legend is placed on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LegendRegion {
    #[default]
    Bottom,
    Top,
}

/// Where and how the legend block is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendPlacement {
    pub region: LegendRegion,
    /// Entries per row. More entries than this wrap into a grid.
    pub columns: usize,
}

impl Default for LegendPlacement {
    fn default() -> Self {
        Self {
            region: LegendRegion::Bottom,
            columns: 5,
        }
    }
}

/// The container of all entities of one diagram.
#[derive(Debug, Clone)]
pub struct Scene {
    canvas: Size,
    background: Color,
    nodes: IndexMap<String, Node>,
    edges: Vec<Edge>,
    legend: Vec<LegendEntry>,
    annotations: Vec<AnnotationBox>,
    legend_placement: LegendPlacement,
    frozen: bool,
}

impl Scene {
    /// Creates an empty scene with a white background.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::InvalidScene`] unless both extents are finite
    /// and strictly positive.
    pub fn new(canvas_width: f32, canvas_height: f32) -> Result<Self, BlueprintError> {
        let canvas = Size::new(canvas_width, canvas_height);
        if !canvas.is_positive() {
            return Err(BlueprintError::InvalidScene(format!(
                "canvas extent must be positive, got {canvas_width}x{canvas_height}"
            )));
        }

        debug!(width = canvas_width, height = canvas_height; "Created scene");
        Ok(Self {
            canvas,
            background: Color::white(),
            nodes: IndexMap::new(),
            edges: Vec::new(),
            legend: Vec::new(),
            annotations: Vec::new(),
            legend_placement: LegendPlacement::default(),
            frozen: false,
        })
    }

    /// Adds a node.
    ///
    /// # Errors
    ///
    /// - [`BlueprintError::SceneFrozen`] after [`Scene::freeze`]
    /// - [`BlueprintError::DuplicateId`] if the id is taken
    /// - [`BlueprintError::InvalidNode`] for an empty id, a non-finite anchor
    ///   a non-positive size or an unusable style
    pub fn add_node(&mut self, node: Node) -> Result<(), BlueprintError> {
        self.ensure_mutable()?;
        if self.nodes.contains_key(node.id()) {
            return Err(BlueprintError::DuplicateId(node.id().to_string()));
        }
        node.validate()?;

        trace!(id = node.id(); "Added node");
        self.nodes.insert(node.id().to_string(), node);
        Ok(())
    }

    /// Adds an edge.
    ///
    /// Node references are resolved immediately against the nodes already in
    /// the scene.
    ///
    /// # Errors
    ///
    /// - [`BlueprintError::SceneFrozen`] after [`Scene::freeze`]
    /// - [`BlueprintError::UnknownNode`] if an endpoint names a missing node
    /// - [`BlueprintError::InvalidScene`] if an endpoint is not finite
    /// - [`BlueprintError::DegenerateEdge`] if both endpoints resolve to the
    ///   same point
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), BlueprintError> {
        self.ensure_mutable()?;
        let (source, destination) =
            layout::resolve_edge(&self.nodes, &edge).map_err(BlueprintError::UnknownNode)?;
        if !source.is_finite() || !destination.is_finite() {
            return Err(BlueprintError::InvalidScene(format!(
                "edge {} has a non-finite endpoint",
                self.edges.len()
            )));
        }
        if source.distance(destination) <= f32::EPSILON {
            return Err(BlueprintError::DegenerateEdge(self.edges.len()));
        }

        trace!(index = self.edges.len(); "Added edge");
        self.edges.push(edge);
        Ok(())
    }

    pub fn add_legend_entry(&mut self, entry: LegendEntry) -> Result<(), BlueprintError> {
        self.ensure_mutable()?;
        self.legend.push(entry);
        Ok(())
    }

    pub fn add_annotation(&mut self, annotation: AnnotationBox) -> Result<(), BlueprintError> {
        self.ensure_mutable()?;
        annotation.validate()?;
        self.annotations.push(annotation);
        Ok(())
    }

    pub fn set_background(&mut self, background: Color) -> Result<(), BlueprintError> {
        self.ensure_mutable()?;
        self.background = background;
        Ok(())
    }

    /// Sets where the legend is drawn.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::InvalidScene`] for a zero column count.
    pub fn set_legend_placement(
        &mut self,
        placement: LegendPlacement,
    ) -> Result<(), BlueprintError> {
        self.ensure_mutable()?;
        if placement.columns == 0 {
            return Err(BlueprintError::InvalidScene(
                "legend column threshold must be at least 1".to_string(),
            ));
        }
        self.legend_placement = placement;
        Ok(())
    }

    /// Makes the scene immutable. Freezing twice is a no-op.
    pub fn freeze(&mut self) {
        if !self.frozen {
            debug!(
                nodes = self.nodes.len(),
                edges = self.edges.len(),
                legend_entries = self.legend.len(),
                annotations = self.annotations.len();
                "Scene frozen"
            );
        }
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    pub fn annotations(&self) -> &[AnnotationBox] {
        &self.annotations
    }

    /// Canvas extent in scene units.
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn legend_placement(&self) -> LegendPlacement {
        self.legend_placement
    }

    pub(crate) fn node_map(&self) -> &IndexMap<String, Node> {
        &self.nodes
    }

    fn ensure_mutable(&self) -> Result<(), BlueprintError> {
        if self.frozen {
            return Err(BlueprintError::SceneFrozen);
        }
        Ok(())
    }
}

fn is_positive_length(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
