//! Color handling for Blueprint diagrams
//!
//! [`Color`] wraps the `DynamicColor` type from the color crate so every CSS
//! color syntax ("#E3F2FD", "lightyellow", "rgb(0 0 0 / 50%)") is accepted
//! wherever the scene model takes a color.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Parses a CSS color string such as "#ff0000", "rgb(255, 0, 0)" or "red".
    ///
    /// # Examples
    ///
    /// ```
    /// use blueprint_core::color::Color;
    ///
    /// let tool = Color::new("#E8F5E9").unwrap();
    /// let notes = Color::new("lightyellow").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Opaque white, the default canvas background.
    pub fn white() -> Self {
        Self::new("white").expect("'white' is a valid CSS color")
    }

    /// Returns a string usable inside an SVG `id` attribute.
    ///
    /// The result contains only alphanumeric characters and underscores and
    /// always starts with a letter.
    ///
    /// ```
    /// use blueprint_core::color::Color;
    ///
    /// let id = Color::new("#ff8000").unwrap().to_id_safe_string();
    /// assert!(id.chars().all(|c| c.is_alphanumeric() || c == '_'));
    /// ```
    pub fn to_id_safe_string(self) -> String {
        let mut sanitized = self
            .to_string()
            .replace('#', "hex")
            .replace(['(', ')', ',', ' ', ';', '.', '%', '/'], "_");

        if sanitized.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            sanitized = format!("c_{sanitized}");
        }

        sanitized
    }

    /// Returns a copy of this color with the given alpha, between 0.0
    /// (transparent) and 1.0 (opaque).
    ///
    /// ```
    /// use blueprint_core::color::Color;
    ///
    /// let label_background = Color::white().with_alpha(0.8);
    /// assert!((label_background.alpha() - 0.8).abs() < 1e-6);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns the fully opaque color as `#rrggbb`.
    ///
    /// SVG output pairs this with an explicit `*-opacity` attribute so the
    /// alpha is applied exactly once.
    pub fn to_paint_string(self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().with_alpha(1.0).to_rgba8();
        format!("{rgba:x}")
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<Color> for svg::node::Value {
    fn from(color: Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#FFE5E5").is_ok());
        assert!(Color::new("lightyellow").is_ok());

        let err = Color::new("not-a-color").unwrap_err();
        assert!(err.contains("not-a-color"));
    }

    #[test]
    fn test_color_from_str() {
        let parsed: Color = "blue".parse().unwrap();
        assert_eq!(parsed, Color::new("blue").unwrap());
    }

    #[test]
    fn test_color_default_and_white() {
        assert_eq!(Color::default().to_string(), "black");
        assert_eq!(Color::white().to_string(), "white");
    }

    #[test]
    fn test_paint_string_is_opaque_hex() {
        assert_eq!(Color::default().to_paint_string(), "#000000");
        assert_eq!(Color::new("#E3F2FD").unwrap().to_paint_string(), "#e3f2fd");
        assert_eq!(
            Color::new("rgb(255 0 0 / 50%)").unwrap().to_paint_string(),
            "#ff0000"
        );
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::new("red").unwrap();
        assert!((color.alpha() - 1.0).abs() < 0.001);

        let transparent = color.with_alpha(0.5);
        assert!((transparent.alpha() - 0.5).abs() < 0.001);
        assert_eq!(transparent.to_paint_string(), color.to_paint_string());
    }

    #[test]
    fn test_color_to_id_safe_string() {
        for source in ["#ff0000", "rgb(1 2 3 / 50%)", "red"] {
            let safe_id = Color::new(source).unwrap().to_id_safe_string();
            assert!(
                safe_id.chars().all(|c| c.is_alphanumeric() || c == '_'),
                "{safe_id} is not id safe"
            );
            assert!(safe_id.chars().next().unwrap().is_ascii_alphabetic());
        }
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let color1 = Color::new("red").unwrap();
        let color2 = Color::new("red").unwrap();
        let color3 = Color::new("blue").unwrap();

        assert_eq!(color1, color2);
        assert_ne!(color1, color3);

        let mut set = HashSet::new();
        set.insert(color1);
        assert!(set.contains(&color2));
        assert!(!set.contains(&color3));
    }
}
