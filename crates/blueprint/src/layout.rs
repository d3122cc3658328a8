//! Manual layout: validation and endpoint resolution.
//!
//! Node positions are supplied by the caller. The [`LayoutAssigner`] checks
//! them against the canvas and turns every [`Edge`] into a pair of concrete
//! points. It is deterministic: the same scene always yields the same layout.

use std::fmt;

use indexmap::IndexMap;
use log::{debug, warn};

use blueprint_core::geometry::{Point, Size};

use crate::{
    error::BlueprintError,
    scene::{Attachment, Edge, EdgeEnd, Node, Scene},
};

/// An edge with both endpoints resolved to scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedEdge {
    pub source: Point,
    pub destination: Point,
}

/// A non-fatal layout finding.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutWarning {
    /// A node anchor lies outside `[0, width] × [0, height]`.
    NodeOutsideCanvas { id: String, anchor: Point },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeOutsideCanvas { id, anchor } => write!(
                f,
                "node `{id}` anchored at ({}, {}) lies outside the canvas",
                anchor.x(),
                anchor.y()
            ),
        }
    }
}

/// Result of laying out a scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    /// One entry per scene edge, in scene order.
    pub edges: Vec<ResolvedEdge>,
    pub warnings: Vec<LayoutWarning>,
}

/// Validates caller-supplied positions and resolves edge endpoints.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutAssigner;

impl LayoutAssigner {
    pub fn new() -> Self {
        Self
    }

    /// Lays out `scene`.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::UnresolvedEdge`] if an edge names a node the
    /// scene does not contain.
    pub fn assign(&self, scene: &Scene) -> Result<Layout, BlueprintError> {
        let warnings = check_anchors(scene.nodes(), scene.canvas());
        let edges = resolve_edges(scene.node_map(), scene.edges())?;

        debug!(
            edges = edges.len(),
            warnings = warnings.len();
            "Layout assigned"
        );
        Ok(Layout { edges, warnings })
    }
}

fn check_anchors<'a>(nodes: impl Iterator<Item = &'a Node>, canvas: Size) -> Vec<LayoutWarning> {
    let mut warnings = Vec::new();
    for node in nodes {
        let anchor = node.anchor();
        let inside = (0.0..=canvas.width()).contains(&anchor.x())
            && (0.0..=canvas.height()).contains(&anchor.y());
        if !inside {
            warn!(id = node.id(), x = anchor.x(), y = anchor.y(); "Node anchor outside canvas");
            warnings.push(LayoutWarning::NodeOutsideCanvas {
                id: node.id().to_string(),
                anchor,
            });
        }
    }
    warnings
}

fn resolve_edges(
    nodes: &IndexMap<String, Node>,
    edges: &[Edge],
) -> Result<Vec<ResolvedEdge>, BlueprintError> {
    edges
        .iter()
        .enumerate()
        .map(|(index, edge)| {
            resolve_edge(nodes, edge)
                .map(|(source, destination)| ResolvedEdge {
                    source,
                    destination,
                })
                .map_err(|node| BlueprintError::UnresolvedEdge { edge: index, node })
        })
        .collect()
}

/// Resolves both endpoints of `edge`.
///
/// On failure, returns the id of the first missing node.
pub(crate) fn resolve_edge(
    nodes: &IndexMap<String, Node>,
    edge: &Edge,
) -> Result<(Point, Point), String> {
    let source_ref = reference_point(nodes, edge.source())?;
    let destination_ref = reference_point(nodes, edge.destination())?;

    let source = attach(nodes, edge.source(), source_ref, destination_ref);
    let destination = attach(nodes, edge.destination(), destination_ref, source_ref);
    Ok((source, destination))
}

/// The literal point, or the node anchor plus offset.
fn reference_point(nodes: &IndexMap<String, Node>, end: &EdgeEnd) -> Result<Point, String> {
    match end {
        EdgeEnd::Point(point) => Ok(*point),
        EdgeEnd::Node(node_ref) => nodes
            .get(node_ref.id())
            .map(|node| node.anchor().add_point(node_ref.offset()))
            .ok_or_else(|| node_ref.id().to_string()),
    }
}

fn attach(
    nodes: &IndexMap<String, Node>,
    end: &EdgeEnd,
    reference: Point,
    opposite: Point,
) -> Point {
    match end {
        EdgeEnd::Node(node_ref) if node_ref.attachment() == Attachment::Boundary => nodes
            .get(node_ref.id())
            .map_or(reference, |node| node.bounds().ray_exit(reference, opposite)),
        _ => reference,
    }
}
