//! Layer-based z-ordering for SVG output.
//!
//! Drawn elements are collected per [`RenderLayer`] and emitted bottom to top,
//! so an element's visual stacking depends only on its layer and on the order
//! it was added within that layer.
//!
//! ```
//! # use blueprint_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Path, Rectangle};
//! let mut output = LayeredOutput::new();
//!
//! // Added first, still drawn on top of the box
//! output.add_to_layer(RenderLayer::Edge, Box::new(Path::new()));
//! output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
//!
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas fill
    Background,
    /// Boxes together with their labels
    Node,
    /// Connector paths and arrowheads
    Edge,
    /// Connector labels and their backgrounds
    EdgeLabel,
    /// The legend block
    Legend,
    /// Title and note panels
    Annotation,
}

impl RenderLayer {
    /// Returns the name written to the `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Node => "node",
            Self::Edge => "edge",
            Self::EdgeLabel => "edge-label",
            Self::Legend => "legend",
            Self::Annotation => "annotation",
        }
    }
}

/// SVG nodes grouped by rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node to the given layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes a `<g data-layer="...">` element. Groups
    /// are returned bottom to top; within a group, nodes keep insertion order.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable, so insertion order survives within a layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::{Path, Rectangle, Text};

    use super::*;

    #[test]
    fn test_layered_output_empty() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_layer_nodes_are_grouped_once() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Annotation, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));

        let rendered = output.render();
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0].to_string().matches("<rect").count(), 2);
    }

    #[test]
    fn test_render_orders_layers_bottom_to_top() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Annotation, Box::new(Text::new("note")));
        output.add_to_layer(RenderLayer::Edge, Box::new(Path::new()));
        output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));

        let rendered: Vec<String> = output.render().iter().map(|n| n.to_string()).collect();
        assert_eq!(rendered.len(), 3);
        assert!(rendered[0].contains("data-layer=\"node\""));
        assert!(rendered[1].contains("data-layer=\"edge\""));
        assert!(rendered[2].contains("data-layer=\"annotation\""));
    }

    #[test]
    fn test_render_keeps_insertion_order_within_layer() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new().set("id", "first")));
        output.add_to_layer(RenderLayer::Edge, Box::new(Path::new()));
        output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new().set("id", "second")));

        let groups = output.render();
        let nodes = groups[0].to_string();
        let first = nodes.find("first").expect("first rectangle rendered");
        let second = nodes.find("second").expect("second rectangle rendered");
        assert!(first < second);
    }
}
