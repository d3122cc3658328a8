//! Configuration types for Blueprint rendering and export.
//!
//! All types implement [`serde::Deserialize`] and default every field, so a
//! configuration file only needs to mention the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`RenderConfig`] - Resolution of the scene-to-pixel mapping.
//! - [`StyleConfig`] - Renderer-wide typography and label defaults.
//! - [`ExportConfig`] - Output scale, background, cropping and format.
//!
//! # Example
//!
//! ```
//! # use blueprint::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [render]
//!     pixels_per_unit = 50.0
//!
//!     [export]
//!     tight_crop = false
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.render().pixels_per_unit(), 50.0);
//! assert!(!config.export().tight_crop());
//! assert_eq!(config.style().font_family(), "sans-serif");
//! ```

use serde::Deserialize;

pub use crate::export::{ExportConfig, ImageFormat};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    render: RenderConfig,

    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    pub fn new(render: RenderConfig, style: StyleConfig, export: ExportConfig) -> Self {
        Self {
            render,
            style,
            export,
        }
    }

    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Replaces the export section, keeping the others.
    pub fn with_export(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }
}

/// Controls how scene units map to pixels.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Pixels per scene unit. Points convert as `pt × pixels_per_unit / 72`,
    /// so the default of 100 behaves like inches at 100 dpi.
    pixels_per_unit: f32,
}

impl RenderConfig {
    pub fn new(pixels_per_unit: f32) -> Self {
        Self { pixels_per_unit }
    }

    pub fn pixels_per_unit(&self) -> f32 {
        self.pixels_per_unit
    }

    /// Checks that the configuration can be rendered with.
    pub fn validate(&self) -> Result<(), String> {
        if !self.pixels_per_unit.is_finite() || self.pixels_per_unit <= 0.0 {
            return Err(format!(
                "pixels_per_unit must be positive, got {}",
                self.pixels_per_unit
            ));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixels_per_unit: 100.0,
        }
    }
}

/// Renderer-wide typography and label defaults.
///
/// Font sizes and padding are in points; the label offset is in scene units.
///
/// Labels sit beside their edge: the offset is measured along the edge
/// normal, on the right of the edge or above it when the edge is horizontal.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    font_family: String,
    monospace_family: String,
    edge_label_font_size: f32,
    /// Distance of an edge label from the edge midpoint.
    edge_label_offset: f32,
    edge_label_background_alpha: f32,
    edge_label_padding: f32,
    legend_font_size: f32,
}

impl StyleConfig {
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn monospace_family(&self) -> &str {
        &self.monospace_family
    }

    pub fn edge_label_font_size(&self) -> f32 {
        self.edge_label_font_size
    }

    pub fn edge_label_offset(&self) -> f32 {
        self.edge_label_offset
    }

    pub fn edge_label_background_alpha(&self) -> f32 {
        self.edge_label_background_alpha
    }

    pub fn edge_label_padding(&self) -> f32 {
        self.edge_label_padding
    }

    pub fn legend_font_size(&self) -> f32 {
        self.legend_font_size
    }

    pub fn with_edge_label_offset(mut self, offset: f32) -> Self {
        self.edge_label_offset = offset;
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_edge_label_font_size(mut self, size: f32) -> Self {
        self.edge_label_font_size = size;
        self
    }

    pub fn with_legend_font_size(mut self, size: f32) -> Self {
        self.legend_font_size = size;
        self
    }

    /// Checks that labels can be laid out with this style.
    pub fn validate(&self) -> Result<(), String> {
        for (name, size) in [
            ("edge_label_font_size", self.edge_label_font_size),
            ("legend_font_size", self.legend_font_size),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(format!("{name} must be positive, got {size}"));
            }
        }
        if !self.edge_label_offset.is_finite() {
            return Err(format!(
                "edge_label_offset must be finite, got {}",
                self.edge_label_offset
            ));
        }
        if !self.edge_label_padding.is_finite() || self.edge_label_padding < 0.0 {
            return Err(format!(
                "edge_label_padding must not be negative, got {}",
                self.edge_label_padding
            ));
        }
        if !(0.0..=1.0).contains(&self.edge_label_background_alpha) {
            return Err(format!(
                "edge_label_background_alpha must be within 0..=1, got {}",
                self.edge_label_background_alpha
            ));
        }
        Ok(())
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            monospace_family: "monospace".to_string(),
            edge_label_font_size: 7.0,
            edge_label_offset: 0.2,
            edge_label_background_alpha: 0.8,
            edge_label_padding: 2.1,
            legend_font_size: 9.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.render().pixels_per_unit(), 100.0);
        assert!(config.render().validate().is_ok());
        assert_eq!(config.style().monospace_family(), "monospace");
        assert_eq!(config.style().edge_label_font_size(), 7.0);
        assert_eq!(config.style().edge_label_offset(), 0.2);
        assert!(config.style().validate().is_ok());
        assert_eq!(config.style().legend_font_size(), 9.0);
        assert_eq!(config.export().scale(), 1.0);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            edge_label_offset = 0.3
            font_family = "DejaVu Sans"
            "#,
        )
        .unwrap();
        assert_eq!(config.style().edge_label_offset(), 0.3);
        assert_eq!(config.style().font_family(), "DejaVu Sans");
        assert_eq!(config.style().edge_label_background_alpha(), 0.8);
        assert_eq!(config.render().pixels_per_unit(), 100.0);
    }

    #[test]
    fn test_render_config_validation() {
        assert!(RenderConfig::new(0.0).validate().is_err());
        assert!(RenderConfig::new(f32::INFINITY).validate().is_err());
        assert!(RenderConfig::new(300.0).validate().is_ok());
    }

    #[test]
    fn test_style_config_validation() {
        let style = StyleConfig::default();
        assert!(style.clone().with_edge_label_font_size(0.0).validate().is_err());
        assert!(style.clone().with_legend_font_size(f32::NAN).validate().is_err());
        assert!(style.clone().with_edge_label_offset(f32::INFINITY).validate().is_err());
        assert!(style.clone().with_edge_label_offset(-0.3).validate().is_ok());

        let config: AppConfig = toml::from_str(
            r#"
            [style]
            edge_label_background_alpha = 1.5
            "#,
        )
        .unwrap();
        assert!(config.style().validate().is_err());

        let config: AppConfig = toml::from_str(
            r#"
            [style]
            edge_label_padding = -1.0
            "#,
        )
        .unwrap();
        assert!(config.style().validate().is_err());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str(
            r#"
            [export]
            format = "gif"
            "#,
        );
        assert!(result.is_err());
    }
}
