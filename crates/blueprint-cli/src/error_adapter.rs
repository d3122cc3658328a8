//! Error adapter for converting BlueprintError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic, LabeledSpan};

use blueprint::BlueprintError;

/// Adapter that renders a [`BlueprintError`] as a miette diagnostic with a
/// stable code and, where one exists, a hint for fixing it.
pub struct ErrorAdapter<'a>(pub &'a BlueprintError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl Diagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            BlueprintError::DuplicateId(_) => "blueprint::scene::duplicate_id",
            BlueprintError::UnknownNode(_) => "blueprint::scene::unknown_node",
            BlueprintError::SceneFrozen => "blueprint::scene::frozen",
            BlueprintError::InvalidScene(_) => "blueprint::scene::invalid",
            BlueprintError::InvalidNode { .. } => "blueprint::scene::invalid_node",
            BlueprintError::DegenerateEdge(_) => "blueprint::scene::degenerate_edge",
            BlueprintError::UnresolvedEdge { .. } => "blueprint::layout::unresolved_edge",
            BlueprintError::Io(_) => "blueprint::io",
            BlueprintError::Export(_) => "blueprint::export",
            BlueprintError::Config(_) => "blueprint::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            BlueprintError::Io(_) => "check that the output directory exists and is writable",
            BlueprintError::Config(_) => {
                "check the configuration file and the --scale/--background flags"
            }
            BlueprintError::Export(_) => "try writing SVG instead by using a .svg output path",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Renders `err` into a human-readable report.
pub fn render_report(err: &BlueprintError) -> String {
    let reporter = miette::GraphicalReportHandler::new();
    let mut writer = String::new();
    if reporter
        .render_report(&mut writer, &ErrorAdapter(err))
        .is_err()
    {
        return err.to_string();
    }
    writer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_help() {
        let err = BlueprintError::Config("scale must be positive".to_string());
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "blueprint::config");
        assert!(adapter.help().is_some());

        let err = BlueprintError::SceneFrozen;
        assert!(ErrorAdapter(&err).help().is_none());
    }

    #[test]
    fn test_report_mentions_message() {
        let err = BlueprintError::DuplicateId("db".to_string());
        let report = render_report(&err);
        assert!(report.contains("duplicate node id"));
    }
}
