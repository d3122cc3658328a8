//! Legend and annotation rendering.
//!
//! The legend is a framed block of swatch and label pairs, centered
//! horizontally just outside the canvas. Annotations are free text blocks
//! aligned against their anchor. Both are drawn in pixel space.

use std::rc::Rc;

use log::debug;
use svg::node::element as svg_element;

use blueprint_core::{
    color::Color,
    draw::{
        BoxDefinition, Drawable, RoundedBox, StrokeDefinition, SvgNode, Text,
        TextAlign, TextDefinition, TextLayout, TextMeasurer,
    },
    geometry::{Bounds, Insets, Point, Size},
};

use crate::{
    config::StyleConfig,
    scene::{
        AnnotationBox, HorizontalAlign, LegendEntry, LegendPlacement, LegendRegion, VerticalAlign,
    },
    surface::Viewport,
};

// Spacing, as multiples of the legend font size
const SWATCH_WIDTH: f32 = 2.0;
const SWATCH_HEIGHT: f32 = 0.7;
const SWATCH_TEXT_GAP: f32 = 0.8;
const COLUMN_GAP: f32 = 2.0;
const ROW_GAP: f32 = 0.5;
const BORDER_PAD: f32 = 0.4;
const FRAME_RADIUS: f32 = 0.2;

/// Distance of the legend from the canvas edge, as a fraction of its height.
const LEGEND_MARGIN: f32 = 0.05;

/// A drawn block and its pixel bounds.
#[derive(Debug)]
pub(crate) struct RenderedBlock {
    pub node: SvgNode,
    pub bounds: Bounds,
}

/// Shape of the legend grid for `count` entries.
///
/// Returns `(columns, rows)`; entries fill rows first.
fn grid_shape(count: usize, threshold: usize) -> (usize, usize) {
    let columns = count.min(threshold.max(1));
    let rows = count.div_ceil(columns.max(1));
    (columns, rows)
}

/// Draws the legend, or nothing when there are no entries.
pub(crate) fn render_legend(
    entries: &[LegendEntry],
    placement: LegendPlacement,
    viewport: &Viewport,
    style: &StyleConfig,
    measurer: &mut TextMeasurer,
) -> Option<RenderedBlock> {
    if entries.is_empty() {
        return None;
    }

    let font_px = viewport.points_to_px(style.legend_font_size());
    let mut text_def = TextDefinition::new();
    text_def.set_font_family(style.font_family());
    text_def.set_font_size(font_px);
    text_def.set_align(TextAlign::Start);

    let layouts: Vec<TextLayout> = entries
        .iter()
        .map(|entry| measurer.layout(entry.label(), &text_def, None))
        .collect();

    let (columns, rows) = grid_shape(entries.len(), placement.columns);
    let swatch = Size::new(SWATCH_WIDTH * font_px, SWATCH_HEIGHT * font_px);
    let gap = SWATCH_TEXT_GAP * font_px;
    let row_height = layouts
        .iter()
        .map(|layout| layout.size().height())
        .fold(swatch.height(), f32::max);

    let column_widths: Vec<f32> = (0..columns)
        .map(|column| {
            let label_width = layouts
                .iter()
                .skip(column)
                .step_by(columns)
                .map(|layout| layout.size().width())
                .fold(0.0, f32::max);
            swatch.width() + gap + label_width
        })
        .collect();

    let border_pad = BORDER_PAD * font_px;
    let width = 2.0 * border_pad
        + column_widths.iter().sum::<f32>()
        + (columns - 1) as f32 * COLUMN_GAP * font_px;
    let height = 2.0 * border_pad
        + rows as f32 * row_height
        + (rows - 1) as f32 * ROW_GAP * font_px;

    let canvas = viewport.canvas_px();
    let margin = LEGEND_MARGIN * canvas.height();
    let top = match placement.region {
        LegendRegion::Bottom => canvas.height() + margin - height,
        LegendRegion::Top => -margin,
    };
    let bounds = Bounds::new_from_top_left(
        Point::new(canvas.width() / 2.0 - width / 2.0, top),
        Size::new(width, height),
    );

    let mut frame_def = BoxDefinition::new();
    frame_def.set_fill_color(Some(Color::white().with_alpha(0.8)));
    frame_def.set_stroke(StrokeDefinition::solid(gray(), 1.0));
    frame_def
        .set_corner_radius((FRAME_RADIUS * font_px).max(0.0))
        .ok();
    let frame = RoundedBox::new(Rc::new(frame_def), bounds.to_size());

    let mut group = svg_element::Group::new()
        .set("class", "legend")
        .add(frame.render_to_svg(bounds.center()));

    for (index, (entry, layout)) in entries.iter().zip(layouts).enumerate() {
        let (row, column) = (index / columns, index % columns);
        let left = bounds.min_x()
            + border_pad
            + column_widths[..column].iter().sum::<f32>()
            + column as f32 * COLUMN_GAP * font_px;
        let center_y = bounds.min_y()
            + border_pad
            + row as f32 * (row_height + ROW_GAP * font_px)
            + row_height / 2.0;

        let mut swatch_def = BoxDefinition::new();
        swatch_def.set_fill_color(Some(entry.swatch()));
        swatch_def.set_stroke(StrokeDefinition::solid(entry.border(), 1.0));
        let swatch_box = RoundedBox::new(Rc::new(swatch_def), swatch);
        group = group.add(
            swatch_box.render_to_svg(Point::new(left + swatch.width() / 2.0, center_y)),
        );

        let label = Text::new(&text_def, layout);
        let label_left = left + swatch.width() + gap;
        group = group.add(label.render_to_svg(Point::new(
            label_left + label.size().width() / 2.0,
            center_y,
        )));
    }

    debug!(entries = entries.len(), columns, rows; "Legend rendered");
    Some(RenderedBlock {
        node: group.into(),
        bounds,
    })
}

/// Draws one annotation block aligned against its anchor.
pub(crate) fn render_annotation(
    annotation: &AnnotationBox,
    viewport: &Viewport,
    style: &StyleConfig,
    measurer: &mut TextMeasurer,
) -> RenderedBlock {
    let annotation_style = annotation.style();

    let mut text_def = TextDefinition::new();
    text_def.set_font_family(if annotation_style.monospace {
        style.monospace_family()
    } else {
        style.font_family()
    });
    text_def.set_font_size(viewport.points_to_px(annotation_style.font_size));
    text_def.set_weight(annotation_style.font_weight);
    text_def.set_color(Some(annotation_style.text_color));
    text_def.set_background_color(annotation_style.background);
    text_def.set_background_radius(viewport.points_to_px(annotation_style.corner_radius));
    text_def.set_padding(Insets::uniform(viewport.points_to_px(annotation_style.padding)));
    text_def.set_align(match annotation.h_align() {
        HorizontalAlign::Left => TextAlign::Start,
        HorizontalAlign::Center => TextAlign::Middle,
        HorizontalAlign::Right => TextAlign::End,
    });

    // Lines are literal, so no wrap width
    let layout = measurer.layout(annotation.text(), &text_def, None);
    let text = Text::new(&text_def, layout);
    let size = text.size();

    let anchor = viewport.to_px(annotation.anchor());
    let center = Point::new(
        match annotation.h_align() {
            HorizontalAlign::Left => anchor.x() + size.width() / 2.0,
            HorizontalAlign::Center => anchor.x(),
            HorizontalAlign::Right => anchor.x() - size.width() / 2.0,
        },
        match annotation.v_align() {
            VerticalAlign::Top => anchor.y() + size.height() / 2.0,
            VerticalAlign::Center => anchor.y(),
            VerticalAlign::Bottom => anchor.y() - size.height() / 2.0,
        },
    );

    RenderedBlock {
        node: text.render_to_svg(center),
        bounds: center.to_bounds(size),
    }
}

fn gray() -> Color {
    Color::new("#cccccc").unwrap_or_default()
}
