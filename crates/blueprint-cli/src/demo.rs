//! The built-in architecture scene rendered by the CLI.
//!
//! A multi-agent order handling system: a customer request enters through an
//! orchestrator, which delegates to specialist agents through wrapper tools.
//! Every agent works through its own tools, which all end in one database.

use blueprint::{
    AnnotationBox, AnnotationStyle, BlueprintError, Edge, EdgeEnd, HorizontalAlign, LegendEntry,
    Node, NodeRef, NodeStyle, Scene, VerticalAlign,
    color::Color,
    draw::FontWeight,
    geometry::{Point, Size},
};

const CANVAS_WIDTH: f32 = 16.0;
const CANVAS_HEIGHT: f32 = 14.0;

const COLOR_CUSTOMER: &str = "#FFE5E5";
const COLOR_ORCHESTRATOR: &str = "#E3F2FD";
const COLOR_AGENT: &str = "#FFF9C4";
const COLOR_TOOL: &str = "#E8F5E9";
const COLOR_DB: &str = "#F3E5F5";

const TITLE: &str = "Munder Difflin Multi-Agent System Architecture";

const NOTES: &str = "Key Design Principles:
• Text-only communication between agents
• Privacy-safe: No inventory counts/cash exposed to customers
• Orchestrator delegates via wrapper tools
• Specialist agents use domain-specific tools
• All transactions logged to SQLite database";

/// One labeled box of the scene.
struct BoxSpec {
    id: &'static str,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    label: &'static str,
    color: &'static str,
    font_size: f32,
    bold: bool,
}

impl BoxSpec {
    fn to_node(&self) -> Result<Node, BlueprintError> {
        let weight = if self.bold {
            FontWeight::Bold
        } else {
            FontWeight::Normal
        };
        let style = NodeStyle::default()
            .with_fill(color(self.color)?)
            .with_font_size(self.font_size)
            .with_font_weight(weight);

        Ok(Node::new(
            self.id,
            Point::new(self.x, self.y),
            Size::new(self.width, self.height),
        )
        .with_label(self.label)
        .with_style(style))
    }
}

#[rustfmt::skip]
const BOXES: &[BoxSpec] = &[
    BoxSpec { id: "customer", x: 8.0, y: 12.5, width: 3.0, height: 0.6, label: "Customer Request\n(includes Date)", color: COLOR_CUSTOMER, font_size: 10.0, bold: true },
    BoxSpec { id: "orchestrator", x: 8.0, y: 10.5, width: 3.5, height: 0.8, label: "Orchestrator Agent", color: COLOR_ORCHESTRATOR, font_size: 11.0, bold: true },

    BoxSpec { id: "orchestrator.catalog", x: 10.5, y: 9.0, width: 2.0, height: 0.5, label: "get_item_catalog_tool\n(SQL SELECT inventory)", color: COLOR_TOOL, font_size: 7.0, bold: false },
    BoxSpec { id: "orchestrator.quote_history", x: 13.0, y: 9.0, width: 2.0, height: 0.5, label: "search_quote_history_tool\n(search_quote_history)", color: COLOR_TOOL, font_size: 7.0, bold: false },
    BoxSpec { id: "orchestrator.financial_report", x: 15.2, y: 9.0, width: 2.0, height: 0.5, label: "generate_financial_report_tool\n(internal reporting only)", color: COLOR_TOOL, font_size: 7.0, bold: false },

    BoxSpec { id: "ask_inventory", x: 3.0, y: 7.5, width: 2.4, height: 0.6, label: "ask_inventory_agent\n(delegates)", color: COLOR_TOOL, font_size: 8.0, bold: true },
    BoxSpec { id: "ask_quote", x: 8.0, y: 7.5, width: 2.4, height: 0.6, label: "ask_quote_agent\n(delegates)", color: COLOR_TOOL, font_size: 8.0, bold: true },
    BoxSpec { id: "ask_fulfillment", x: 13.0, y: 7.5, width: 2.4, height: 0.6, label: "ask_fulfillment_agent\n(delegates)", color: COLOR_TOOL, font_size: 8.0, bold: true },

    BoxSpec { id: "inventory_agent", x: 3.0, y: 5.8, width: 2.2, height: 0.7, label: "InventoryAgent", color: COLOR_AGENT, font_size: 10.0, bold: true },
    BoxSpec { id: "quote_agent", x: 8.0, y: 5.8, width: 2.2, height: 0.7, label: "QuoteAgent", color: COLOR_AGENT, font_size: 10.0, bold: true },
    BoxSpec { id: "fulfillment_agent", x: 13.0, y: 5.8, width: 2.2, height: 0.7, label: "FulfillmentAgent", color: COLOR_AGENT, font_size: 10.0, bold: true },

    BoxSpec { id: "inventory.status", x: 0.5, y: 4.0, width: 1.0, height: 0.7, label: "safe_inventory_status_tool\n(availability check)", color: COLOR_TOOL, font_size: 6.0, bold: false },
    BoxSpec { id: "inventory.catalog", x: 1.6, y: 4.0, width: 1.0, height: 0.7, label: "get_item_catalog_tool\n(SQL SELECT inventory)", color: COLOR_TOOL, font_size: 6.0, bold: false },
    BoxSpec { id: "inventory.all", x: 2.7, y: 4.0, width: 1.0, height: 0.7, label: "get_all_inventory_tool\n(get_all_inventory)", color: COLOR_TOOL, font_size: 6.0, bold: false },
    BoxSpec { id: "inventory.stock_level", x: 3.8, y: 4.0, width: 1.0, height: 0.7, label: "get_stock_level_tool\n(get_stock_level)", color: COLOR_TOOL, font_size: 6.0, bold: false },
    BoxSpec { id: "inventory.stock_order", x: 4.9, y: 4.0, width: 1.0, height: 0.7, label: "create_stock_order_tool\n(create_transaction:\nstock_orders)", color: COLOR_TOOL, font_size: 6.0, bold: false },

    BoxSpec { id: "quote.history", x: 7.0, y: 4.0, width: 1.8, height: 0.5, label: "search_quote_history_tool\n(search_quote_history)", color: COLOR_TOOL, font_size: 6.0, bold: false },
    BoxSpec { id: "quote.catalog", x: 9.0, y: 4.0, width: 1.8, height: 0.5, label: "get_item_catalog_tool\n(SQL SELECT inventory)", color: COLOR_TOOL, font_size: 6.0, bold: false },

    BoxSpec { id: "fulfillment.status", x: 11.5, y: 4.0, width: 1.3, height: 0.7, label: "safe_inventory_status_tool\n(availability check)", color: COLOR_TOOL, font_size: 6.0, bold: false },
    BoxSpec { id: "fulfillment.sale", x: 13.0, y: 4.0, width: 1.3, height: 0.7, label: "create_sale_tool\n(create_transaction:\nsales)", color: COLOR_TOOL, font_size: 6.0, bold: false },
    BoxSpec { id: "fulfillment.delivery_date", x: 14.5, y: 4.0, width: 1.3, height: 0.7, label: "supplier_delivery_date_tool\n(get_supplier_delivery_date)", color: COLOR_TOOL, font_size: 6.0, bold: false },

    BoxSpec { id: "database", x: 8.0, y: 1.5, width: 3.0, height: 0.8, label: "SQLite Database\nmunder_difflin.db\n(inventory, transactions, quotes, quote_requests)", color: COLOR_DB, font_size: 9.0, bold: true },
];

/// Edges pinned to exact points on their nodes, as `(id, x, y)` pairs.
#[rustfmt::skip]
const PINNED_EDGES: &[((&str, f32, f32), (&str, f32, f32))] = &[
    (("orchestrator", 9.2, 10.2), ("orchestrator.catalog", 9.6, 9.25)),
    (("orchestrator", 9.5, 10.1), ("orchestrator.quote_history", 12.1, 9.25)),
    (("orchestrator", 9.7, 10.0), ("orchestrator.financial_report", 14.3, 9.25)),

    (("orchestrator", 6.5, 10.3), ("ask_inventory", 3.8, 8.1)),
    (("orchestrator", 8.0, 10.1), ("ask_quote", 8.0, 8.1)),
    (("orchestrator", 9.5, 10.3), ("ask_fulfillment", 12.2, 8.1)),

    (("inventory_agent", 3.0, 5.45), ("inventory.status", 0.5, 4.35)),
    (("inventory_agent", 3.0, 5.45), ("inventory.catalog", 1.6, 4.35)),
    (("inventory_agent", 3.0, 5.45), ("inventory.all", 2.7, 4.35)),
    (("inventory_agent", 3.0, 5.45), ("inventory.stock_level", 3.8, 4.35)),
    (("inventory_agent", 3.0, 5.45), ("inventory.stock_order", 4.9, 4.35)),

    (("quote_agent", 8.0, 5.45), ("quote.history", 7.0, 4.25)),
    (("quote_agent", 8.0, 5.45), ("quote.catalog", 9.0, 4.25)),

    (("fulfillment_agent", 13.0, 5.45), ("fulfillment.status", 11.5, 4.35)),
    (("fulfillment_agent", 13.0, 5.45), ("fulfillment.sale", 13.0, 4.35)),
    (("fulfillment_agent", 13.0, 5.45), ("fulfillment.delivery_date", 14.5, 4.35)),

    (("inventory.status", 1.0, 3.65), ("database", 6.5, 1.9)),
    (("inventory.all", 3.0, 3.65), ("database", 7.5, 1.9)),
    (("quote.history", 7.0, 3.75), ("database", 7.5, 1.9)),
    (("quote.catalog", 9.0, 3.75), ("database", 8.5, 1.9)),
    (("fulfillment.status", 12.0, 3.65), ("database", 8.5, 1.9)),
    (("fulfillment.delivery_date", 14.0, 3.65), ("database", 9.0, 1.9)),
];

/// Edges between vertically stacked boxes, meeting their nearest sides.
const STACKED_EDGES: &[(&str, &str)] = &[
    ("customer", "orchestrator"),
    ("ask_inventory", "inventory_agent"),
    ("ask_quote", "quote_agent"),
    ("ask_fulfillment", "fulfillment_agent"),
];

const LEGEND: &[(&str, &str)] = &[
    ("Customer Input", COLOR_CUSTOMER),
    ("Orchestrator", COLOR_ORCHESTRATOR),
    ("Specialist Agent", COLOR_AGENT),
    ("Tool/Function", COLOR_TOOL),
    ("Database", COLOR_DB),
];

/// Builds the frozen architecture scene.
///
/// # Errors
///
/// Returns an error if the scene is inconsistent, which would be a bug in
/// the tables above.
pub fn architecture_scene() -> Result<Scene, BlueprintError> {
    let mut scene = Scene::new(CANVAS_WIDTH, CANVAS_HEIGHT)?;

    scene.add_annotation(
        AnnotationBox::new(TITLE, Point::new(8.0, 13.5))
            .with_style(
                AnnotationStyle::default()
                    .with_font_size(16.0)
                    .with_font_weight(FontWeight::Bold),
            )
            .with_alignment(HorizontalAlign::Center, VerticalAlign::Bottom),
    )?;

    for spec in BOXES {
        scene.add_node(spec.to_node()?)?;
    }

    for (source, destination) in STACKED_EDGES {
        scene.add_edge(Edge::new(
            EdgeEnd::boundary(*source),
            EdgeEnd::boundary(*destination),
        ))?;
    }
    for ((source, sx, sy), (destination, dx, dy)) in PINNED_EDGES {
        let source = pin(&scene, source, Point::new(*sx, *sy))?;
        let destination = pin(&scene, destination, Point::new(*dx, *dy))?;
        scene.add_edge(Edge::new(source, destination))?;
    }

    for (label, swatch) in LEGEND {
        scene.add_legend_entry(LegendEntry::new(*label, color(swatch)?))?;
    }

    scene.add_annotation(
        AnnotationBox::new(NOTES, Point::new(0.5, 11.5))
            .with_style(
                AnnotationStyle::default()
                    .with_font_size(8.0)
                    .with_monospace(true)
                    .with_background(color("lightyellow")?.with_alpha(0.8))
                    .with_padding(4.0)
                    .with_corner_radius(4.0),
            )
            .with_alignment(HorizontalAlign::Left, VerticalAlign::Top),
    )?;

    scene.freeze();
    Ok(scene)
}

/// References node `id` at an absolute scene point.
fn pin(scene: &Scene, id: &str, point: Point) -> Result<NodeRef, BlueprintError> {
    let node = scene
        .node(id)
        .ok_or_else(|| BlueprintError::UnknownNode(id.to_string()))?;
    Ok(NodeRef::new(id).with_offset(point.sub_point(node.anchor())))
}

fn color(css: &str) -> Result<Color, BlueprintError> {
    Color::new(css).map_err(BlueprintError::InvalidScene)
}
