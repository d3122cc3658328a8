//! Blueprint - an engine for hand-laid-out architecture diagrams.
//!
//! A diagram is described as a [`Scene`]: labeled boxes placed at explicit
//! coordinates, directed edges between them, a legend and free-floating
//! annotations. The [`Renderer`] draws a scene onto a [`Surface`], which
//! [`export`] writes as SVG or PNG.
//!
//! Scene coordinates are abstract units with the origin at the bottom-left
//! and y pointing up.
//!
//! # Example
//!
//! ```rust,no_run
//! use blueprint::{Blueprint, Edge, EdgeEnd, Node, Scene, config::AppConfig};
//! use blueprint::geometry::{Point, Size};
//!
//! let mut scene = Scene::new(16.0, 14.0)?;
//! scene.add_node(Node::new("api", Point::new(8.0, 10.5), Size::new(3.5, 0.8)).with_label("API"))?;
//! scene.add_node(Node::new("db", Point::new(8.0, 1.5), Size::new(3.0, 0.8)).with_label("Database"))?;
//! scene.add_edge(Edge::new(EdgeEnd::boundary("api"), EdgeEnd::boundary("db")))?;
//! scene.freeze();
//!
//! let mut blueprint = Blueprint::new(AppConfig::default());
//! blueprint.render_to_file(&scene, "diagram.png")?;
//! # Ok::<(), blueprint::BlueprintError>(())
//! ```

pub mod config;

mod error;
mod export;
mod layout;
mod legend;
mod render;
mod scene;
mod surface;

pub use blueprint_core::{color, draw, geometry};

pub use error::BlueprintError;
pub use export::{ExportConfig, ImageFormat, export, to_svg_string};
pub use layout::{Layout, LayoutAssigner, LayoutWarning, ResolvedEdge};
pub use render::{Renderer, render};
pub use scene::{
    AnnotationBox, AnnotationStyle, Attachment, Edge, EdgeEnd, HorizontalAlign, LegendEntry,
    LegendPlacement, LegendRegion, Node, NodeRef, NodeStyle, Scene, VerticalAlign,
};
pub use surface::{RenderedEdge, RenderedNode, Surface, Viewport};

use std::path::Path;

use log::info;

use config::AppConfig;

/// Renders and exports scenes with one configuration.
///
/// Holds a [`Renderer`], so the system font database is loaded once and
/// reused for every scene.
///
/// # Examples
///
/// ```rust,no_run
/// use blueprint::{Blueprint, Scene, config::AppConfig};
///
/// let scene = Scene::new(4.0, 3.0).expect("valid canvas");
/// let mut blueprint = Blueprint::new(AppConfig::default());
///
/// let surface = blueprint.render(&scene).expect("Failed to render");
/// let svg = blueprint.to_svg(&surface).expect("Failed to serialize");
/// println!("{svg}");
/// ```
#[derive(Debug)]
pub struct Blueprint {
    config: AppConfig,
    renderer: Renderer,
}

impl Blueprint {
    pub fn new(config: AppConfig) -> Self {
        let renderer = Renderer::new(config.render().clone(), config.style().clone());
        Self { config, renderer }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lays out and draws `scene`.
    ///
    /// # Errors
    ///
    /// See [`Renderer::render`].
    pub fn render(&mut self, scene: &Scene) -> Result<Surface, BlueprintError> {
        self.renderer.render(scene)
    }

    /// Serializes a rendered surface as SVG using the export settings.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::Config`] if the export settings are invalid.
    pub fn to_svg(&self, surface: &Surface) -> Result<String, BlueprintError> {
        to_svg_string(surface, self.config.export())
    }

    /// Writes a rendered surface to `path`.
    ///
    /// # Errors
    ///
    /// See [`export()`].
    pub fn export(&self, surface: &Surface, path: impl AsRef<Path>) -> Result<(), BlueprintError> {
        export(surface, path, self.config.export())
    }

    /// Renders `scene` and writes it to `path` in one step.
    ///
    /// # Errors
    ///
    /// Returns any error from rendering or exporting.
    pub fn render_to_file(
        &mut self,
        scene: &Scene,
        path: impl AsRef<Path>,
    ) -> Result<Surface, BlueprintError> {
        let path = path.as_ref();
        info!(path:? = path; "Rendering scene to file");
        let surface = self.render(scene)?;
        self.export(&surface, path)?;
        Ok(surface)
    }
}

impl Default for Blueprint {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
