use svg::node::element as svg_element;

use crate::{
    draw::{Arrow, ArrowDrawer, Drawable, SvgNode, Text},
    geometry::{Point, Size},
};

/// An arrow with an optional label near its midpoint.
///
/// The label is centered on the segment midpoint shifted by `label_offset`
/// (pixels, y-down).
#[derive(Debug, Clone)]
pub struct ArrowWithText<'a> {
    arrow: Arrow,
    text: Option<Text<'a>>,
    label_offset: Point,
}

impl<'a> ArrowWithText<'a> {
    pub fn new(arrow: Arrow) -> Self {
        Self {
            arrow,
            text: None,
            label_offset: Point::default(),
        }
    }

    pub fn with_text(mut self, text: Text<'a>, label_offset: Point) -> Self {
        self.text = Some(text);
        self.label_offset = label_offset;
        self
    }

    pub fn arrow(&self) -> &Arrow {
        &self.arrow
    }

    pub fn text(&self) -> Option<&Text<'a>> {
        self.text.as_ref()
    }

    /// Returns the size of the label, or zero when there is none.
    pub fn text_size(&self) -> Size {
        self.text.as_ref().map(|t| t.size()).unwrap_or_default()
    }

    /// Center of the label for an arrow between the given points.
    pub fn label_position(&self, source: Point, destination: Point) -> Point {
        source.midpoint(destination).add_point(self.label_offset)
    }

    /// Renders the arrow path and, separately, its label.
    ///
    /// The label is returned apart from the path so it can be placed on a
    /// higher layer than every connector.
    pub fn render_to_svg(
        &self,
        arrow_drawer: &mut ArrowDrawer,
        source: Point,
        destination: Point,
    ) -> (SvgNode, Option<SvgNode>) {
        let rendered_arrow = arrow_drawer.draw_arrow(&self.arrow, source, destination);

        let rendered_text = self.text.as_ref().map(|text| {
            let position = self.label_position(source, destination);
            let node: SvgNode = svg_element::Group::new()
                .set("class", "edge-label")
                .add(text.render_to_svg(position))
                .into();
            node
        });

        (rendered_arrow, rendered_text)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        color::Color,
        draw::{ArrowDefinition, ArrowDirection, StrokeDefinition, TextDefinition, TextMeasurer},
    };

    fn forward_arrow() -> Arrow {
        let definition = ArrowDefinition::new(StrokeDefinition::solid(Color::default(), 1.5));
        Arrow::new(Rc::new(definition), ArrowDirection::Forward)
    }

    #[test]
    fn test_arrow_without_text() {
        let arrow = ArrowWithText::new(forward_arrow());
        assert!(arrow.text().is_none());
        assert!(arrow.text_size().is_zero());

        let mut drawer = ArrowDrawer::new();
        let (path, label) =
            arrow.render_to_svg(&mut drawer, Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(path.to_string().contains("<path"));
        assert!(label.is_none());
    }

    #[test]
    fn test_label_position_is_offset_midpoint() {
        let def = TextDefinition::default();
        let mut measurer = TextMeasurer::new();
        let layout = measurer.layout("delegates", &def, None);
        let arrow =
            ArrowWithText::new(forward_arrow()).with_text(Text::new(&def, layout), Point::new(20.0, 0.0));

        let position = arrow.label_position(Point::new(800.0, 100.0), Point::new(800.0, 300.0));
        assert_approx_eq!(f32, position.x(), 820.0);
        assert_approx_eq!(f32, position.y(), 200.0);
    }

    #[test]
    fn test_label_rendered_separately() {
        let def = TextDefinition::default();
        let mut measurer = TextMeasurer::new();
        let layout = measurer.layout("returns", &def, None);
        let arrow =
            ArrowWithText::new(forward_arrow()).with_text(Text::new(&def, layout), Point::default());

        let mut drawer = ArrowDrawer::new();
        let (path, label) =
            arrow.render_to_svg(&mut drawer, Point::new(0.0, 0.0), Point::new(0.0, 100.0));
        assert!(!path.to_string().contains("returns"));
        let label = label.expect("label rendered").to_string();
        assert!(label.contains("class=\"edge-label\""));
        assert!(label.contains("returns"));
    }
}
