//! Example: Building a scene programmatically
//!
//! Places three boxes by hand, connects them and writes the result as SVG.

use blueprint::{
    Blueprint, Edge, EdgeEnd, LegendEntry, Node, NodeRef, NodeStyle, Scene,
    color::Color,
    config::AppConfig,
    draw::{ArrowDirection, StrokeStyle},
    geometry::{Point, Size},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building scene...\n");

    let service = NodeStyle::default().with_fill(Color::new("#E3F2FD")?);
    let storage = NodeStyle::default().with_fill(Color::new("#F5F5F5")?);

    let mut scene = Scene::new(8.0, 6.0)?;
    scene.add_node(
        Node::new("client", Point::new(4.0, 5.0), Size::new(2.5, 0.6))
            .with_label("Web Client")
            .with_style(service.clone()),
    )?;
    scene.add_node(
        Node::new("server", Point::new(4.0, 3.0), Size::new(2.5, 0.8))
            .with_label("API Server")
            .with_style(service.clone()),
    )?;
    scene.add_node(
        Node::new("database", Point::new(4.0, 1.0), Size::new(2.5, 0.6))
            .with_label("Database")
            .with_style(storage.clone()),
    )?;

    scene.add_edge(
        Edge::new(EdgeEnd::boundary("client"), EdgeEnd::boundary("server")).with_label("HTTPS"),
    )?;
    scene.add_edge(
        Edge::new(
            NodeRef::new("server").with_offset(Point::new(-0.5, 0.0)),
            NodeRef::new("database").with_offset(Point::new(-0.5, 0.0)),
        )
        .with_label("queries"),
    )?;
    scene.add_edge(
        Edge::new(
            NodeRef::new("database").with_offset(Point::new(0.5, 0.0)),
            NodeRef::new("server").with_offset(Point::new(0.5, 0.0)),
        )
        .with_direction(ArrowDirection::Forward)
        .with_line_style(StrokeStyle::Dashed),
    )?;

    scene.add_legend_entry(LegendEntry::new("Service", service.fill))?;
    scene.add_legend_entry(LegendEntry::new("Storage", storage.fill))?;
    scene.freeze();

    println!("Created scene:");
    println!("  Nodes: {}", scene.nodes().len());
    println!("  Edges: {}", scene.edges().len());
    println!();

    let mut blueprint = Blueprint::new(AppConfig::default());
    let surface = blueprint.render(&scene)?;
    let svg = blueprint.to_svg(&surface)?;
    println!("SVG length: {} bytes", svg.len());

    let output_path = "from_scene_output.svg";
    blueprint.export(&surface, output_path)?;
    println!("SVG written to: {output_path}");

    Ok(())
}
