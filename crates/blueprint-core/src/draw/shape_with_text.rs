use svg::node::element as svg_element;

use crate::{
    draw::{Drawable, RoundedBox, SvgNode, Text},
    geometry::{Point, Size},
};

/// A box with an optional label centered inside it.
///
/// The label is laid out by the caller, usually wrapped to the box's nominal
/// width. A label taller or wider than the box is drawn as is and overflows
/// the outline; it is never shrunk.
#[derive(Debug, Clone)]
pub struct LabeledBox<'a> {
    shape: RoundedBox,
    text: Option<Text<'a>>,
}

impl<'a> LabeledBox<'a> {
    pub fn new(shape: RoundedBox, text: Option<Text<'a>>) -> Self {
        Self { shape, text }
    }

    pub fn shape(&self) -> &RoundedBox {
        &self.shape
    }

    pub fn text(&self) -> Option<&Text<'a>> {
        self.text.as_ref()
    }

    /// Returns true when the label fits inside the nominal box.
    pub fn label_fits(&self) -> bool {
        let nominal = self.shape.nominal_size();
        self.text.as_ref().is_none_or(|text| {
            let label = text.size();
            label.width() <= nominal.width() && label.height() <= nominal.height()
        })
    }
}

impl Drawable for LabeledBox<'_> {
    fn render_to_svg(&self, position: Point) -> SvgNode {
        let mut group = svg_element::Group::new().add(self.shape.render_to_svg(position));

        if let Some(text) = &self.text {
            group = group.add(text.render_to_svg(position));
        }

        group.into()
    }

    fn size(&self) -> Size {
        self.shape.size()
    }
}
