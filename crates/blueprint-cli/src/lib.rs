//! CLI logic for the Blueprint diagram tool.
//!
//! Builds the architecture scene, renders it and writes it to the requested
//! output file.

pub mod demo;
pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use log::{debug, info};

use blueprint::{Blueprint, BlueprintError, ExportConfig};

/// Run the Blueprint CLI application
///
/// Loads the configuration, applies command-line overrides, renders the
/// architecture scene and exports it to `args.output`.
///
/// # Errors
///
/// Returns `BlueprintError` for:
/// - Configuration loading errors
/// - Invalid export overrides
/// - Rendering errors
/// - File I/O errors
pub fn run(args: &Args) -> Result<(), BlueprintError> {
    info!(output_path = args.output; "Rendering architecture diagram");

    let app_config = config::load_config(args.config.as_ref())?;
    let export = apply_overrides(app_config.export().clone(), args);
    export.validate().map_err(BlueprintError::Config)?;

    let scene = demo::architecture_scene()?;
    let mut blueprint = Blueprint::new(app_config.with_export(export));
    let surface = blueprint.render_to_file(&scene, &args.output)?;

    debug!(warnings = surface.warnings().len(); "Surface exported");
    println!("Diagram saved as: {}", args.output);

    Ok(())
}

fn apply_overrides(mut export: ExportConfig, args: &Args) -> ExportConfig {
    if let Some(scale) = args.scale {
        export = export.with_scale(scale);
    }
    if let Some(background) = &args.background {
        export = export.with_background_color(background.clone());
    }
    if args.no_crop {
        export = export.with_tight_crop(false);
    }
    export
}
