//! Integration tests for building, rendering and exporting scenes.

use std::fs;

use float_cmp::assert_approx_eq;

use blueprint::{
    AnnotationBox, AnnotationStyle, Blueprint, BlueprintError, Edge, EdgeEnd, ExportConfig,
    ImageFormat, LegendEntry, Node, Renderer, Scene,
    color::Color,
    config::{AppConfig, RenderConfig, StyleConfig},
    draw::ArrowStyle,
    geometry::{Point, Size},
};

fn two_box_scene() -> Scene {
    let mut scene = Scene::new(16.0, 14.0).unwrap();
    scene
        .add_node(
            Node::new("customer", Point::new(8.0, 12.5), Size::new(3.0, 0.6))
                .with_label("Customer Inquiry"),
        )
        .unwrap();
    scene
        .add_node(
            Node::new("orchestrator", Point::new(8.0, 10.5), Size::new(3.5, 0.8))
                .with_label("Main Orchestrator Agent"),
        )
        .unwrap();
    scene
        .add_edge(Edge::new(
            EdgeEnd::boundary("customer"),
            EdgeEnd::boundary("orchestrator"),
        ))
        .unwrap();
    scene
        .add_legend_entry(LegendEntry::new("Orchestrator", Color::new("#FFE5E5").unwrap()))
        .unwrap();
    scene
        .add_annotation(AnnotationBox::new("Notes", Point::new(0.5, 11.5)))
        .unwrap();
    scene.freeze();
    scene
}

#[test]
fn test_node_bounds_follow_anchor_and_size() {
    let node = Node::new("n", Point::new(10.0, 10.0), Size::new(4.0, 2.0));
    let bounds = node.bounds();
    assert_approx_eq!(f32, bounds.min_x(), 8.0);
    assert_approx_eq!(f32, bounds.max_x(), 12.0);
    assert_approx_eq!(f32, bounds.min_y(), 9.0);
    assert_approx_eq!(f32, bounds.max_y(), 11.0);
}

#[test]
fn test_arrowhead_lands_on_destination() {
    let mut scene = Scene::new(16.0, 14.0).unwrap();
    scene
        .add_node(Node::new("A", Point::new(0.0, 0.0), Size::new(1.0, 1.0)))
        .unwrap();
    scene
        .add_node(Node::new("B", Point::new(10.0, 0.0), Size::new(1.0, 1.0)))
        .unwrap();
    scene
        .add_edge(Edge::new(EdgeEnd::node("A"), EdgeEnd::node("B")))
        .unwrap();

    let surface = blueprint::render(&scene).unwrap();
    assert_eq!(surface.edges()[0].heads, vec![Point::new(10.0, 0.0)]);
}

#[test]
fn test_stacked_boxes_do_not_overlap() {
    let surface = blueprint::render(&two_box_scene()).unwrap();

    let customer = surface.node("customer").unwrap();
    let orchestrator = surface.node("orchestrator").unwrap();
    assert!(!customer.outline.overlaps(orchestrator.outline));

    let edge = &surface.edges()[0];
    assert_approx_eq!(f32, edge.source.x(), edge.destination.x());
    assert_approx_eq!(f32, edge.source.y(), 12.2, epsilon = 1e-4);
    assert_approx_eq!(f32, edge.destination.y(), 10.9, epsilon = 1e-4);
    assert!(surface.legend_bounds().is_some());
    assert_eq!(surface.annotation_bounds().len(), 1);
}

#[test]
fn test_rejected_mutations_leave_scene_unchanged() {
    let mut scene = Scene::new(16.0, 14.0).unwrap();
    scene
        .add_node(Node::new("db", Point::new(8.0, 1.5), Size::new(3.0, 0.8)))
        .unwrap();

    let err = scene
        .add_node(Node::new("db", Point::new(2.0, 2.0), Size::new(1.0, 1.0)))
        .unwrap_err();
    assert!(matches!(err, BlueprintError::DuplicateId(ref id) if id == "db"));
    assert_eq!(scene.nodes().len(), 1);
    assert_eq!(scene.node("db").unwrap().anchor(), Point::new(8.0, 1.5));

    let err = scene
        .add_edge(Edge::new(EdgeEnd::node("db"), EdgeEnd::node("cache")))
        .unwrap_err();
    assert!(matches!(err, BlueprintError::UnknownNode(ref id) if id == "cache"));
    assert!(scene.edges().is_empty());

    scene.freeze();
    let err = scene
        .add_node(Node::new("late", Point::new(1.0, 1.0), Size::new(1.0, 1.0)))
        .unwrap_err();
    assert!(matches!(err, BlueprintError::SceneFrozen));
    assert_eq!(scene.nodes().len(), 1);
}

#[test]
fn test_svg_export_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.svg");
    let second = dir.path().join("second.svg");

    let mut blueprint = Blueprint::default();
    let surface = blueprint.render_to_file(&two_box_scene(), &first).unwrap();
    blueprint.export(&surface, &second).unwrap();

    let first = fs::read(first).unwrap();
    assert!(!first.is_empty());
    assert_eq!(first, fs::read(second).unwrap());
    assert!(String::from_utf8(first).unwrap().contains("<svg"));
}

#[test]
fn test_png_export_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.png");
    let second = dir.path().join("second.png");

    let mut blueprint = Blueprint::default();
    let surface = blueprint.render(&two_box_scene()).unwrap();
    blueprint.export(&surface, &first).unwrap();
    blueprint.export(&surface, &second).unwrap();

    let first = fs::read(first).unwrap();
    assert!(first.starts_with(b"\x89PNG"));
    assert_eq!(first, fs::read(second).unwrap());
}

#[test]
fn test_forced_format_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagram.png");
    let config = AppConfig::default()
        .with_export(ExportConfig::default().with_format(ImageFormat::Svg));

    let mut blueprint = Blueprint::new(config);
    blueprint.render_to_file(&two_box_scene(), &path).unwrap();
    assert!(fs::read_to_string(path).unwrap().contains("<svg"));
}

#[test]
fn test_crop_and_scale_change_document_size() {
    let scene = two_box_scene();
    let surface = blueprint::render(&scene).unwrap();

    let full = ExportConfig::default().with_tight_crop(false);
    let svg = blueprint::to_svg_string(&surface, &full).unwrap();
    assert!(svg.contains(r#"viewBox="0 0 1600 1400""#), "{svg}");

    let doubled = ExportConfig::default()
        .with_tight_crop(false)
        .with_scale(2.0)
        .with_background_color("#f0f0f0");
    let svg = blueprint::to_svg_string(&surface, &doubled).unwrap();
    assert!(svg.contains(r#"width="3200""#));
    assert!(svg.contains(r#"height="2800""#));

    let err = blueprint::to_svg_string(&surface, &ExportConfig::default().with_scale(-1.0))
        .unwrap_err();
    assert!(matches!(err, BlueprintError::Config(_)));
}

#[test]
fn test_unwritable_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("diagram.svg");

    let surface = blueprint::render(&two_box_scene()).unwrap();
    let err = blueprint::export(&surface, &path, &ExportConfig::default()).unwrap_err();
    assert!(matches!(err, BlueprintError::Io(_)));
    assert!(!path.exists());
}

#[test]
fn test_edge_labels_sit_beside_their_edge() {
    let mut scene = Scene::new(16.0, 14.0).unwrap();
    scene
        .add_edge(Edge::new(Point::new(2.0, 7.0), Point::new(12.0, 7.0)).with_label("sync"))
        .unwrap();
    scene
        .add_edge(Edge::new(Point::new(8.0, 12.0), Point::new(8.0, 9.0)).with_label("query"))
        .unwrap();
    scene
        .add_edge(
            Edge::new(Point::new(1.0, 1.0), Point::new(3.0, 1.0))
                .with_label("pinned")
                .with_label_offset(Point::new(0.0, -0.5)),
        )
        .unwrap();

    let surface = blueprint::render(&scene).unwrap();
    let centers: Vec<Point> = surface
        .edges()
        .iter()
        .map(|edge| edge.label_bounds.unwrap().center())
        .collect();

    // Horizontal: lifted off the stroke
    assert_approx_eq!(f32, centers[0].x(), 7.0, epsilon = 1e-3);
    assert_approx_eq!(f32, centers[0].y(), 7.2, epsilon = 1e-3);
    // Vertical: nudged to the right
    assert_approx_eq!(f32, centers[1].x(), 8.2, epsilon = 1e-3);
    assert_approx_eq!(f32, centers[1].y(), 10.5, epsilon = 1e-3);
    // Explicit offsets win
    assert_approx_eq!(f32, centers[2].x(), 2.0, epsilon = 1e-3);
    assert_approx_eq!(f32, centers[2].y(), 0.5, epsilon = 1e-3);
}

#[test]
fn test_curved_edge_extends_content_bounds() {
    let mut scene = Scene::new(16.0, 14.0).unwrap();
    scene
        .add_edge(
            Edge::new(Point::new(8.0, 10.0), Point::new(8.0, 4.0))
                .with_path_style(ArrowStyle::Curved),
        )
        .unwrap();

    let surface = blueprint::render(&scene).unwrap();
    let bounds = surface.content_bounds();
    assert!(bounds.max_y() > 10.0, "{bounds:?}");
    assert!(bounds.min_y() < 4.0, "{bounds:?}");
}

#[test]
fn test_invalid_style_is_config_error() {
    let style = StyleConfig::default().with_edge_label_font_size(0.0);
    let mut renderer = Renderer::new(RenderConfig::default(), style);

    let err = renderer.render(&two_box_scene()).unwrap_err();
    assert!(matches!(err, BlueprintError::Config(_)));
}

#[test]
fn test_indented_annotation_keeps_its_whitespace() {
    let mut scene = Scene::new(16.0, 14.0).unwrap();
    scene
        .add_annotation(
            AnnotationBox::new("Notes:\n    indented detail", Point::new(4.0, 4.0))
                .with_style(AnnotationStyle::default().with_monospace(true)),
        )
        .unwrap();

    let surface = blueprint::render(&scene).unwrap();
    let svg = blueprint::to_svg_string(&surface, &ExportConfig::default()).unwrap();
    assert!(svg.contains(">    indented detail</tspan>"), "{svg}");
}
