//! Rounded box definitions and rendering.
//!
//! A [`RoundedBox`] is drawn around a nominal size: the outline sits `pad`
//! pixels outside it on every side, like a padded bounding box.

use std::rc::Rc;

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, StrokeDefinition, SvgNode},
    geometry::{Insets, Point, Size},
};

/// Fill, border, rounding and padding of a box. Lengths are in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxDefinition {
    fill_color: Option<Color>,
    stroke: StrokeDefinition,
    corner_radius: f32,
    pad: f32,
}

impl BoxDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fill. `None` leaves the box unfilled.
    pub fn set_fill_color(&mut self, color: Option<Color>) {
        self.fill_color = color;
    }

    pub fn set_stroke(&mut self, stroke: StrokeDefinition) {
        self.stroke = stroke;
    }

    pub fn set_corner_radius(&mut self, radius: f32) -> Result<(), String> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(format!("corner radius must be non-negative, got {radius}"));
        }
        self.corner_radius = radius;
        Ok(())
    }

    pub fn set_pad(&mut self, pad: f32) -> Result<(), String> {
        if !pad.is_finite() || pad < 0.0 {
            return Err(format!("box pad must be non-negative, got {pad}"));
        }
        self.pad = pad;
        Ok(())
    }

    pub fn fill_color(&self) -> Option<Color> {
        self.fill_color
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn pad(&self) -> f32 {
        self.pad
    }
}

impl Default for BoxDefinition {
    fn default() -> Self {
        Self {
            fill_color: Some(Color::white()),
            stroke: StrokeDefinition::default(),
            corner_radius: 0.0,
            pad: 0.0,
        }
    }
}

/// A box of a fixed nominal size drawn with a [`BoxDefinition`].
#[derive(Debug, Clone)]
pub struct RoundedBox {
    definition: Rc<BoxDefinition>,
    nominal_size: Size,
}

impl RoundedBox {
    pub fn new(definition: Rc<BoxDefinition>, nominal_size: Size) -> Self {
        Self {
            definition,
            nominal_size,
        }
    }

    pub fn definition(&self) -> &BoxDefinition {
        &self.definition
    }

    /// The size the caller asked for, before padding.
    pub fn nominal_size(&self) -> Size {
        self.nominal_size
    }
}

impl Drawable for RoundedBox {
    fn render_to_svg(&self, position: Point) -> SvgNode {
        let bounds = position.to_bounds(self.size());

        let rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", self.definition.corner_radius())
            .set("ry", self.definition.corner_radius());

        let rect = match self.definition.fill_color() {
            Some(fill) => rect
                .set("fill", fill.to_paint_string())
                .set("fill-opacity", fill.alpha()),
            None => rect.set("fill", "none"),
        };

        Box::new(crate::apply_stroke!(rect, self.definition.stroke()))
    }

    /// Outline size, including the pad on both sides.
    fn size(&self) -> Size {
        self.nominal_size
            .add_padding(Insets::uniform(self.definition.pad()))
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_box_definition_rejects_negative_lengths() {
        let mut def = BoxDefinition::new();
        assert!(def.set_pad(-1.0).is_err());
        assert!(def.set_corner_radius(f32::NAN).is_err());
        assert!(def.set_pad(10.0).is_ok());
        assert_approx_eq!(f32, def.pad(), 10.0);
    }

    #[test]
    fn test_rounded_box_size_includes_pad() {
        let mut def = BoxDefinition::new();
        def.set_pad(10.0).unwrap();
        let rounded = RoundedBox::new(Rc::new(def), Size::new(400.0, 200.0));

        assert_eq!(rounded.nominal_size(), Size::new(400.0, 200.0));
        assert_approx_eq!(f32, rounded.size().width(), 420.0);
        assert_approx_eq!(f32, rounded.size().height(), 220.0);
    }

    #[test]
    fn test_rounded_box_render_centered() {
        let mut def = BoxDefinition::new();
        def.set_fill_color(Some(Color::new("#E3F2FD").unwrap()));
        def.set_corner_radius(5.0).unwrap();
        let rounded = RoundedBox::new(Rc::new(def), Size::new(100.0, 50.0));

        let rendered = rounded.render_to_svg(Point::new(200.0, 100.0)).to_string();
        assert!(rendered.contains("x=\"150\""));
        assert!(rendered.contains("y=\"75\""));
        assert!(rendered.contains("rx=\"5\""));
        let stroke = format!("stroke=\"{}\"", Color::default().to_paint_string());
        assert!(rendered.contains(&stroke), "{rendered}");
    }

    #[test]
    fn test_rounded_box_without_fill() {
        let mut def = BoxDefinition::new();
        def.set_fill_color(None);
        let rounded = RoundedBox::new(Rc::new(def), Size::new(10.0, 10.0));

        let rendered = rounded.render_to_svg(Point::default()).to_string();
        assert!(rendered.contains("fill=\"none\""));
    }
}
