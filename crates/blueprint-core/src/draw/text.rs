//! Text styling, measurement and rendering.
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`TextMeasurer`] - Measures and word-wraps text with real font metrics
//! - [`TextLayout`] - The measured lines of one piece of text
//! - [`Text`] - A renderable text block combining a layout with its style
//!
//! ```
//! # use blueprint_core::draw::{Text, TextDefinition, TextMeasurer};
//! let mut style = TextDefinition::new();
//! style.set_font_size(12.0);
//!
//! let mut measurer = TextMeasurer::new();
//! let layout = measurer.layout("Orchestrator Agent", &style, None);
//! let text = Text::new(&style, layout);
//! assert_eq!(text.lines().len(), 1);
//! ```

use std::fmt;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style, Weight, Wrap};
use log::{info, trace, warn};
use svg::{self, node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, SvgNode},
    geometry::{Insets, Point, Size},
};

/// Rough advance of an average glyph, as a fraction of the font size.
///
/// Used only when the font system has no usable fonts.
const FALLBACK_GLYPH_WIDTH: f32 = 0.55;

/// Distance between baselines as a multiple of the font size.
const LINE_HEIGHT: f32 = 1.2;

/// Font weight of a text block.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

/// Font slant of a text block.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FontSlant {
    #[default]
    Normal,
    Italic,
}

impl FontSlant {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
        }
    }
}

/// How lines are aligned against each other inside a text block.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAlign {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Visual style for a block of text.
///
/// Sizes are in pixels.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `12` |
/// | Weight / slant | normal |
/// | Line height | `1.2` × font size |
/// | Text color | `None` (SVG default, black) |
/// | Background | `None` |
/// | Padding | zero |
/// | Alignment | middle |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: f32,
    weight: FontWeight,
    slant: FontSlant,
    color: Option<Color>,
    background_color: Option<Color>,
    background_radius: f32,
    padding: Insets,
    align: TextAlign,
}

impl TextDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font family, e.g. "DejaVu Sans" or a generic family such as
    /// "monospace".
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the font size in pixels.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    pub fn set_weight(&mut self, weight: FontWeight) {
        self.weight = weight;
    }

    pub fn set_slant(&mut self, slant: FontSlant) {
        self.slant = slant;
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Sets the background fill. `None` draws no background.
    pub fn set_background_color(&mut self, color: Option<Color>) {
        self.background_color = color;
    }

    /// Corner radius of the background rectangle in pixels.
    pub fn set_background_radius(&mut self, radius: f32) {
        self.background_radius = radius;
    }

    /// Space between the text and the edge of its background. Padding counts
    /// toward the block size whether or not a background is drawn.
    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    pub fn set_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn slant(&self) -> FontSlant {
        self.slant
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn align(&self) -> TextAlign {
        self.align
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Distance between consecutive baselines in pixels.
    pub fn line_height_px(&self) -> f32 {
        self.font_size * LINE_HEIGHT
    }

    fn attrs(&self) -> Attrs<'_> {
        let family = match self.font_family.as_str() {
            "sans-serif" => Family::SansSerif,
            "serif" => Family::Serif,
            "monospace" => Family::Monospace,
            "cursive" => Family::Cursive,
            "fantasy" => Family::Fantasy,
            name => Family::Name(name),
        };
        let weight = match self.weight {
            FontWeight::Normal => Weight::NORMAL,
            FontWeight::Bold => Weight::BOLD,
        };
        let style = match self.slant {
            FontSlant::Normal => Style::Normal,
            FontSlant::Italic => Style::Italic,
        };
        Attrs::new().family(family).weight(weight).style(style)
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 12.0,
            weight: FontWeight::default(),
            slant: FontSlant::default(),
            color: None,
            background_color: None,
            background_radius: 0.0,
            padding: Insets::default(),
            align: TextAlign::default(),
        }
    }
}

/// Measured lines of a text, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    lines: Vec<String>,
    width: f32,
    line_height: f32,
}

impl TextLayout {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Size of the text itself, without padding.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.line_height * self.lines.len() as f32)
    }
}

/// Measures text and breaks it into lines using `cosmic-text`.
///
/// Each measurer owns its own font system; loading one scans the system
/// fonts, so a measurer is created once per render and reused for every label.
pub struct TextMeasurer {
    font_system: FontSystem,
}

impl fmt::Debug for TextMeasurer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextMeasurer").finish_non_exhaustive()
    }
}

impl Default for TextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer {
    pub fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: FontSystem::new(),
        }
    }

    /// Lays out `content` with the given style.
    ///
    /// Explicit `\n` breaks are always honored. When `wrap_width` is set,
    /// lines are additionally broken at word boundaries so that no line is
    /// wider than `wrap_width`, except single words that cannot fit at all.
    ///
    /// Unwrapped lines keep their leading whitespace. A font size that is not
    /// a positive number yields the raw lines with a zero size.
    pub fn layout(
        &mut self,
        content: &str,
        definition: &TextDefinition,
        wrap_width: Option<f32>,
    ) -> TextLayout {
        let line_height = definition.line_height_px();
        if content.is_empty() {
            return TextLayout {
                lines: Vec::new(),
                width: 0.0,
                line_height,
            };
        }
        if !(line_height.is_finite() && line_height > 0.0) {
            warn!(font_size = definition.font_size(); "Unusable font size, skipping measurement");
            return TextLayout {
                lines: content.split('\n').map(|line| line.trim_end().to_string()).collect(),
                width: 0.0,
                line_height: 0.0,
            };
        }

        let metrics = Metrics::new(definition.font_size(), line_height);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut self.font_system);

        buffer.set_wrap(if wrap_width.is_some() {
            Wrap::Word
        } else {
            Wrap::None
        });
        buffer.set_size(wrap_width, None);

        let attrs = definition.attrs();
        buffer.set_text(content, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut lines = Vec::new();
        let mut width: f32 = 0.0;
        let mut shaped = false;
        for run in buffer.layout_runs() {
            let start = run.glyphs.iter().map(|glyph| glyph.start).min();
            let end = run.glyphs.iter().map(|glyph| glyph.end).max();
            match (start, end) {
                (Some(start), Some(end)) => {
                    shaped = true;
                    let line = if wrap_width.is_some() {
                        run.text[start..end].trim()
                    } else {
                        run.text.trim_end()
                    };
                    lines.push(line.to_string());
                }
                _ => lines.push(String::new()),
            }
            width = width.max(run.line_w);
        }

        if !shaped && !content.trim().is_empty() {
            trace!(content; "No glyphs shaped, estimating text size");
            return approximate_layout(content, definition, wrap_width);
        }

        TextLayout {
            lines,
            width,
            line_height,
        }
    }
}

/// Greedy word wrap with a fixed per-character advance.
fn approximate_layout(
    content: &str,
    definition: &TextDefinition,
    wrap_width: Option<f32>,
) -> TextLayout {
    let glyph_width = definition.font_size() * FALLBACK_GLYPH_WIDTH;
    let measure = |line: &str| line.chars().count() as f32 * glyph_width;

    let mut lines = Vec::new();
    for paragraph in content.split('\n') {
        let Some(limit) = wrap_width else {
            lines.push(paragraph.trim_end().to_string());
            continue;
        };

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure(&candidate) <= limit || current.is_empty() {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }

    let width = lines.iter().map(|line| measure(line)).fold(0.0, f32::max);
    TextLayout {
        lines,
        width,
        line_height: definition.line_height_px(),
    }
}

/// A renderable text block.
///
/// The position passed to [`Drawable::render_to_svg`] is the center of the
/// block including its padding.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    layout: TextLayout,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, layout: TextLayout) -> Self {
        Self { definition, layout }
    }

    pub fn lines(&self) -> &[String] {
        self.layout.lines()
    }

    /// Size of the text without padding.
    pub fn content_size(&self) -> Size {
        self.layout.size()
    }
}

impl Drawable for Text<'_> {
    fn render_to_svg(&self, position: Point) -> SvgNode {
        let mut group = svg_element::Group::new();
        let content_size = self.content_size();

        if let Some(background) = self.definition.background_color() {
            let bounds = position.to_bounds(self.size());
            let rect = svg_element::Rectangle::new()
                .set("x", bounds.min_x())
                .set("y", bounds.min_y())
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("rx", self.definition.background_radius)
                .set("fill", background.to_paint_string())
                .set("fill-opacity", background.alpha());
            group = group.add(rect);
        }

        // Padding may be asymmetric, so locate the text area explicitly
        let padding = self.definition.padding();
        let block = position.to_bounds(self.size());
        let text_left = block.min_x() + padding.left();
        let text_top = block.min_y() + padding.top();

        let align = self.definition.align();
        let x = match align {
            TextAlign::Start => text_left,
            TextAlign::Middle => text_left + content_size.width() / 2.0,
            TextAlign::End => text_left + content_size.width(),
        };

        let mut text = svg_element::Text::new("")
            .set("text-anchor", align.to_svg_value())
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size())
            .set("font-weight", self.definition.weight().to_svg_value())
            .set("font-style", self.definition.slant().to_svg_value());

        if let Some(color) = self.definition.color() {
            text = text
                .set("fill", color.to_paint_string())
                .set("fill-opacity", color.alpha());
        }

        let line_height = self.definition.line_height_px();
        for (index, line) in self.layout.lines().iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let y = text_top + line_height * (index as f32 + 0.5);
            let tspan = svg_element::TSpan::new("")
                .set("x", x)
                .set("y", y)
                .set("xml:space", "preserve")
                .add(SvgText::new(line.as_str()));
            text = text.add(tspan);
        }

        group.add(text).into()
    }

    fn size(&self) -> Size {
        self.content_size().add_padding(self.definition.padding())
    }
}
