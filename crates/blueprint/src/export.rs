//! Writing surfaces to SVG and PNG files.
//!
//! The SVG document is built in memory; PNG output rasterizes that document
//! with resvg. Files are written to a temporary file in the destination
//! directory and renamed into place, so a failed export never leaves a
//! partial file at the target path.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, error, info};
use serde::Deserialize;
use svg::{Document, node::element as svg_element};

use blueprint_core::{
    color::Color,
    draw::{LayeredOutput, RenderLayer},
    geometry::{Bounds, Insets, Point},
};

use crate::{error::BlueprintError, surface::Surface};

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    /// Picks a format from the path extension.
    ///
    /// `.svg` (in any case) selects SVG; everything else, including a missing
    /// extension, selects PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Self::Svg,
            _ => Self::Png,
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Multiplier applied to the output size.
    scale: f32,
    /// Overrides the scene background when set.
    background_color: Option<String>,
    /// Crop the output to the drawn content instead of the canvas.
    tight_crop: bool,
    /// Margin kept around the content when cropping, in scene units.
    crop_margin: f32,
    /// Forces a format regardless of the file extension.
    format: Option<ImageFormat>,
}

impl ExportConfig {
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// The background override, parsed.
    ///
    /// # Errors
    ///
    /// Returns an error message if the configured color cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color.as_deref().map(Color::new).transpose()
    }

    pub fn tight_crop(&self) -> bool {
        self.tight_crop
    }

    pub fn crop_margin(&self) -> f32 {
        self.crop_margin
    }

    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_tight_crop(mut self, tight_crop: bool) -> Self {
        self.tight_crop = tight_crop;
        self
    }

    pub fn with_crop_margin(mut self, margin: f32) -> Self {
        self.crop_margin = margin;
        self
    }

    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Checks that the configuration can be exported with.
    pub fn validate(&self) -> Result<(), String> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(format!("scale must be positive, got {}", self.scale));
        }
        if !self.crop_margin.is_finite() || self.crop_margin < 0.0 {
            return Err(format!(
                "crop_margin must not be negative, got {}",
                self.crop_margin
            ));
        }
        self.background_color()?;
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background_color: None,
            tight_crop: true,
            crop_margin: 0.1,
            format: None,
        }
    }
}

/// Serializes `surface` as an SVG document.
///
/// # Errors
///
/// Returns [`BlueprintError::Config`] if `config` is invalid.
pub fn to_svg_string(surface: &Surface, config: &ExportConfig) -> Result<String, BlueprintError> {
    config.validate().map_err(BlueprintError::Config)?;
    let doc = build_document(surface, config)?;
    Ok(doc.to_string())
}

/// Writes `surface` to `path`.
///
/// The format comes from [`ExportConfig::format`] when set, otherwise from
/// the file extension. Exporting the same surface twice with the same
/// configuration produces identical bytes.
///
/// # Errors
///
/// - [`BlueprintError::Config`] if `config` is invalid
/// - [`BlueprintError::Export`] if rasterization fails
/// - [`BlueprintError::Io`] if the file cannot be written
pub fn export(
    surface: &Surface,
    path: impl AsRef<Path>,
    config: &ExportConfig,
) -> Result<(), BlueprintError> {
    let path = path.as_ref();
    let format = config
        .format()
        .unwrap_or_else(|| ImageFormat::from_path(path));

    let svg = to_svg_string(surface, config)?;
    let bytes = match format {
        ImageFormat::Svg => svg.into_bytes(),
        ImageFormat::Png => rasterize(&svg)?,
    };

    write_atomically(path, &bytes)?;
    info!(path:? = path, format:? = format, bytes = bytes.len(); "Diagram exported");
    Ok(())
}

fn build_document(surface: &Surface, config: &ExportConfig) -> Result<Document, BlueprintError> {
    let viewport = surface.viewport();
    let view = if config.tight_crop() {
        let margin = viewport.length_to_px(config.crop_margin());
        viewport
            .bounds_to_px(surface.content_bounds())
            .add_padding(Insets::uniform(margin))
    } else {
        Bounds::new_from_top_left(Point::default(), viewport.canvas_px())
    };
    debug!(
        min_x = view.min_x(),
        min_y = view.min_y(),
        width = view.width(),
        height = view.height();
        "Export view box"
    );

    let background = config
        .background_color()
        .map_err(BlueprintError::Config)?
        .unwrap_or_else(|| surface.background());

    let mut output = LayeredOutput::new();
    output.add_to_layer(
        RenderLayer::Background,
        Box::new(
            svg_element::Rectangle::new()
                .set("x", view.min_x())
                .set("y", view.min_y())
                .set("width", view.width())
                .set("height", view.height())
                .set("fill", background.to_paint_string())
                .set("fill-opacity", background.alpha()),
        ),
    );

    let mut doc = Document::new()
        .set(
            "viewBox",
            (view.min_x(), view.min_y(), view.width(), view.height()),
        )
        .set("width", view.width() * config.scale())
        .set("height", view.height() * config.scale());
    for layer in output.render() {
        doc = doc.add(layer);
    }
    Ok(doc.add(surface.content().clone()))
}

fn rasterize(svg: &str) -> Result<Vec<u8>, BlueprintError> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &options).map_err(|err| {
        error!(err:err; "Failed to parse generated SVG");
        BlueprintError::Export(err.to_string())
    })?;

    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
        BlueprintError::Export(format!(
            "cannot allocate a {}x{} image",
            size.width(),
            size.height()
        ))
    })?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::default(),
        &mut pixmap.as_mut(),
    );

    pixmap
        .encode_png()
        .map_err(|err| BlueprintError::Export(err.to_string()))
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), BlueprintError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(&dir).map_err(|err| {
        error!(path:? = path, err:err; "Failed to create temporary file");
        BlueprintError::Io(err)
    })?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| {
        error!(path:? = path, err:err = err.error; "Failed to move file into place");
        BlueprintError::Io(err.error)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_path(Path::new("out.svg")), ImageFormat::Svg);
        assert_eq!(ImageFormat::from_path(Path::new("OUT.SVG")), ImageFormat::Svg);
        assert_eq!(ImageFormat::from_path(Path::new("out.png")), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("out.jpeg")), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("out")), ImageFormat::Png);
    }

    #[test]
    fn test_validate() {
        assert!(ExportConfig::default().validate().is_ok());
        assert!(ExportConfig::default().with_scale(0.0).validate().is_err());
        assert!(ExportConfig::default().with_scale(f32::NAN).validate().is_err());
        assert!(
            ExportConfig::default()
                .with_crop_margin(-1.0)
                .validate()
                .is_err()
        );
        assert!(
            ExportConfig::default()
                .with_background_color("not-a-color")
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_background_color_override() {
        let config = ExportConfig::default().with_background_color("#ff0000");
        let color = config.background_color().unwrap().unwrap();
        assert_eq!(color, Color::new("#ff0000").unwrap());
        assert_eq!(ExportConfig::default().background_color(), Ok(None));
    }
}
