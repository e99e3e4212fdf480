//! Output formatters for lint results

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::config::{OutputConfig, OutputFormat};
use crate::diagnostic::Diagnostic;
use crate::engine::LintResult;
use std::path::Path;

/// Output formatter trait
pub trait OutputFormatter: Send + Sync {
    /// Format the entire lint result
    fn format(&self, result: &LintResult) -> String;

    /// Format a single diagnostic reported against `file`
    fn format_diagnostic(&self, file: &Path, diagnostic: &Diagnostic) -> String;
}

/// Build the formatter for the configured output
pub fn formatter_for(config: &OutputConfig, colored: bool) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter {
            colored,
            show_fixes: config.suggestions,
            show_stats: config.statistics,
        }),
        OutputFormat::Json => Box::new(JsonFormatter::new().pretty()),
    }
}
