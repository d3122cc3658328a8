//! Command-line argument definitions for the Blueprint CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the output path, configuration file
//! selection, export overrides and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Blueprint diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the output file; `.svg` writes SVG, anything else PNG
    #[arg(short, long, default_value = "architecture_diagram.png")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output size multiplier, overriding the configuration
    #[arg(long)]
    pub scale: Option<f32>,

    /// Background color, overriding the configuration
    #[arg(long)]
    pub background: Option<String>,

    /// Export the whole canvas instead of cropping to the content
    #[arg(long)]
    pub no_crop: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
