//! Rendering a [`Scene`] onto a [`Surface`].
//!
//! Drawing happens in pixel space through a [`Viewport`]. Elements are
//! collected per [`RenderLayer`] so the stacking order is fixed: background,
//! nodes, edges, edge labels, legend, annotations. Within a layer, scene
//! insertion order is kept.

use std::rc::Rc;

use log::{debug, info};
use svg::node::element as svg_element;

use blueprint_core::{
    color::Color,
    draw::{
        Arrow, ArrowDefinition, ArrowDrawer, ArrowWithText, BoxDefinition, FontSlant,
        LabeledBox, LayeredOutput, PositionedDrawable, RenderLayer, RoundedBox, StrokeDefinition,
        SvgNode, Text, TextDefinition, TextMeasurer,
    },
    geometry::{Bounds, Insets, Point},
};

use crate::{
    config::{RenderConfig, StyleConfig},
    error::BlueprintError,
    layout::{LayoutAssigner, ResolvedEdge},
    legend,
    scene::{Edge, Node, Scene},
    surface::{RenderedEdge, RenderedNode, Surface, Viewport},
};

/// Draws scenes onto surfaces.
///
/// A renderer owns the font system used to measure labels. Reuse one renderer
/// for several scenes to avoid rescanning system fonts.
#[derive(Debug)]
pub struct Renderer {
    config: RenderConfig,
    style: StyleConfig,
    measurer: TextMeasurer,
}

impl Renderer {
    pub fn new(config: RenderConfig, style: StyleConfig) -> Self {
        Self {
            config,
            style,
            measurer: TextMeasurer::new(),
        }
    }

    /// Lays out and draws `scene`.
    ///
    /// The scene is only read; it does not have to be frozen.
    ///
    /// # Errors
    ///
    /// - [`BlueprintError::Config`] if the render or style configuration is
    ///   invalid
    /// - [`BlueprintError::UnresolvedEdge`] if an edge cannot be resolved
    pub fn render(&mut self, scene: &Scene) -> Result<Surface, BlueprintError> {
        self.config.validate().map_err(BlueprintError::Config)?;
        self.style.validate().map_err(BlueprintError::Config)?;

        info!(
            nodes = scene.nodes().len(),
            edges = scene.edges().len();
            "Rendering scene"
        );
        let layout = LayoutAssigner::new().assign(scene)?;
        let viewport = Viewport::new(scene.canvas(), self.config.pixels_per_unit());

        let mut output = LayeredOutput::new();
        let mut drawn: Option<Bounds> = None;
        let mut include = |bounds: Bounds| {
            drawn = Some(drawn.map_or(bounds, |current| current.merge(&bounds)));
        };

        let mut nodes = Vec::with_capacity(scene.nodes().len());
        for node in scene.nodes() {
            let (svg_node, outline) = self.draw_node(node, &viewport);
            output.add_to_layer(RenderLayer::Node, svg_node);
            include(outline);
            nodes.push(RenderedNode {
                id: node.id().to_string(),
                bounds: node.bounds(),
                outline: viewport.bounds_to_scene(outline),
            });
        }

        let mut arrow_drawer = ArrowDrawer::new();
        let mut edges = Vec::with_capacity(scene.edges().len());
        for (edge, resolved) in scene.edges().iter().zip(&layout.edges) {
            let drawn_edge = self.draw_edge(edge, *resolved, &viewport, &mut arrow_drawer);
            output.add_to_layer(RenderLayer::Edge, drawn_edge.path);
            include(drawn_edge.path_bounds);
            if let Some((label, bounds)) = drawn_edge.label {
                output.add_to_layer(RenderLayer::EdgeLabel, label);
                include(bounds);
            }
            edges.push(drawn_edge.rendered);
        }

        let legend_bounds = legend::render_legend(
            scene.legend(),
            scene.legend_placement(),
            &viewport,
            &self.style,
            &mut self.measurer,
        )
        .map(|block| {
            output.add_to_layer(RenderLayer::Legend, block.node);
            include(block.bounds);
            viewport.bounds_to_scene(block.bounds)
        });

        let mut annotation_bounds = Vec::with_capacity(scene.annotations().len());
        for annotation in scene.annotations() {
            let block =
                legend::render_annotation(annotation, &viewport, &self.style, &mut self.measurer);
            output.add_to_layer(RenderLayer::Annotation, block.node);
            include(block.bounds);
            annotation_bounds.push(viewport.bounds_to_scene(block.bounds));
        }

        let canvas_px = Bounds::new_from_top_left(Default::default(), viewport.canvas_px());
        let content_bounds = viewport.bounds_to_scene(drawn.unwrap_or(canvas_px));

        let mut content = svg_element::Group::new()
            .set("class", "blueprint")
            .add(arrow_drawer.draw_marker_definitions());
        for layer in output.render() {
            content = content.add(layer);
        }

        info!(
            markers = arrow_drawer.marker_count(),
            warnings = layout.warnings.len();
            "Scene rendered"
        );
        Ok(Surface {
            viewport,
            background: scene.background(),
            content,
            nodes,
            edges,
            legend_bounds,
            annotation_bounds,
            content_bounds,
            warnings: layout.warnings,
        })
    }

    /// Draws a node box with its label. Returns the SVG and the outline
    /// bounds in pixels.
    fn draw_node(&mut self, node: &Node, viewport: &Viewport) -> (SvgNode, Bounds) {
        let style = node.style();

        let mut box_def = BoxDefinition::new();
        box_def.set_fill_color(Some(style.fill));
        box_def.set_stroke(StrokeDefinition::solid(
            style.border_color,
            viewport.points_to_px(style.border_width),
        ));
        if let Err(err) = box_def.set_corner_radius(viewport.length_to_px(style.corner_radius)) {
            debug!(id = node.id(), error = err.as_str(); "Ignoring corner radius");
        }
        if let Err(err) = box_def.set_pad(viewport.length_to_px(style.pad)) {
            debug!(id = node.id(), error = err.as_str(); "Ignoring box pad");
        }

        let nominal = node.size().scale(viewport.pixels_per_unit());
        let shape = RoundedBox::new(Rc::new(box_def), nominal);

        let mut text_def = TextDefinition::new();
        text_def.set_font_family(self.style.font_family());
        text_def.set_font_size(viewport.points_to_px(style.font_size));
        text_def.set_weight(style.font_weight);
        text_def.set_color(Some(style.text_color));

        let text = (!node.label().is_empty()).then(|| {
            let layout = self
                .measurer
                .layout(node.label(), &text_def, Some(nominal.width()));
            Text::new(&text_def, layout)
        });

        let labeled = LabeledBox::new(shape, text);
        if !labeled.label_fits() {
            debug!(id = node.id(); "Label overflows its box");
        }

        let positioned =
            PositionedDrawable::new(labeled).with_position(viewport.to_px(node.anchor()));
        (positioned.render(), positioned.bounds())
    }

    fn draw_edge(
        &mut self,
        edge: &Edge,
        resolved: ResolvedEdge,
        viewport: &Viewport,
        arrow_drawer: &mut ArrowDrawer,
    ) -> DrawnEdge {
        let mut stroke =
            StrokeDefinition::solid(edge.color(), viewport.points_to_px(edge.line_width()));
        stroke.set_style(edge.line_style().clone());
        let mut arrow_def = ArrowDefinition::new(stroke);
        arrow_def.set_style(edge.path_style());
        let arrow = Arrow::new(Rc::new(arrow_def), edge.direction());

        let source = viewport.to_px(resolved.source);
        let destination = viewport.to_px(resolved.destination);
        let heads = arrow.head_points(resolved.source, resolved.destination);
        let path_bounds = arrow.path_bounds(source, destination);

        let label_def = edge.label().map(|_| self.edge_label_definition(viewport));
        let mut arrow_with_text = ArrowWithText::new(arrow);
        if let (Some(label), Some(label_def)) = (edge.label(), label_def.as_ref()) {
            let layout = self.measurer.layout(label, label_def, None);
            let offset = edge.label_offset().unwrap_or_else(|| {
                label_normal(resolved.source, resolved.destination)
                    .scale(self.style.edge_label_offset())
            });
            arrow_with_text =
                arrow_with_text.with_text(Text::new(label_def, layout), viewport.offset_to_px(offset));
        }

        let (path, label) = arrow_with_text.render_to_svg(arrow_drawer, source, destination);
        let label = label.map(|node| {
            let bounds = arrow_with_text
                .label_position(source, destination)
                .to_bounds(arrow_with_text.text_size());
            (node, bounds)
        });

        DrawnEdge {
            rendered: RenderedEdge {
                source: resolved.source,
                destination: resolved.destination,
                heads,
                label_bounds: label
                    .as_ref()
                    .map(|(_, bounds)| viewport.bounds_to_scene(*bounds)),
            },
            path,
            path_bounds,
            label,
        }
    }

    fn edge_label_definition(&self, viewport: &Viewport) -> TextDefinition {
        let padding = viewport.points_to_px(self.style.edge_label_padding());
        let mut def = TextDefinition::new();
        def.set_font_family(self.style.font_family());
        def.set_font_size(viewport.points_to_px(self.style.edge_label_font_size()));
        def.set_slant(FontSlant::Italic);
        def.set_background_color(Some(
            Color::white().with_alpha(self.style.edge_label_background_alpha()),
        ));
        def.set_background_radius(padding);
        def.set_padding(Insets::uniform(padding));
        def
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderConfig::default(), StyleConfig::default())
    }
}

/// Unit normal of the edge from `source` to `destination`, pointing right,
/// or up for horizontal edges.
fn label_normal(source: Point, destination: Point) -> Point {
    let delta = destination.sub_point(source);
    let length = source.distance(destination);
    if length <= f32::EPSILON {
        return Point::default();
    }

    let normal = Point::new(-delta.y() / length, delta.x() / length);
    let flip = if normal.x().abs() <= f32::EPSILON {
        normal.y() < 0.0
    } else {
        normal.x() < 0.0
    };
    if flip { normal.scale(-1.0) } else { normal }
}

struct DrawnEdge {
    rendered: RenderedEdge,
    path: SvgNode,
    path_bounds: Bounds,
    label: Option<(SvgNode, Bounds)>,
}

/// Renders `scene` with the default configuration.
pub fn render(scene: &Scene) -> Result<Surface, BlueprintError> {
    Renderer::default().render(scene)
}
