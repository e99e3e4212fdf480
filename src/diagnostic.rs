//! Diagnostic types for linting results

use crate::error::LintError;
use crate::source::{Position, Range, SourceText};
use serde::{Deserialize, Serialize};

/// Marker after which a message carries its suggested replacement
pub const SUGGESTION_MARKER: &str = "Did you mean: ";

/// Severity level for diagnostics
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,
    /// Warning - style violation
    #[default]
    Warning,
    /// Error - definite problem
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" | "hint" | "note" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" | "err" => Ok(Severity::Error),
            _ => Err(()),
        }
    }
}

/// A lint diagnostic
///
/// Never mutated once it has been handed to the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule ID that triggered this diagnostic
    pub rule_id: String,
    /// Severity level
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Zero-based, half-open span
    pub range: Range,
    /// Replacement text for `range`, proposed but never applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic, picking up a suggestion from the message
    pub fn new(rule_id: &str, severity: Severity, message: &str, range: Range) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            severity,
            message: message.to_string(),
            range,
            suggestion: extract_suggestion(message),
        }
    }
}

/// Pull `X` out of a message ending in "Did you mean: X"
pub fn extract_suggestion(message: &str) -> Option<String> {
    let (_, suggestion) = message.rsplit_once(SUGGESTION_MARKER)?;
    let suggestion = suggestion.trim();
    if suggestion.is_empty() {
        None
    } else {
        Some(suggestion.to_string())
    }
}

/// Where a diagnostic should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Explicit range
    Range(Range),
    /// Line and start column; the extent is inferred from the text
    Point { line: usize, column: usize },
    /// Single-line span
    Span {
        line: usize,
        start_column: usize,
        end_column: usize,
    },
}

impl From<Range> for Anchor {
    fn from(range: Range) -> Self {
        Anchor::Range(range)
    }
}

impl From<(usize, usize)> for Anchor {
    fn from((line, column): (usize, usize)) -> Self {
        Anchor::Point { line, column }
    }
}

impl From<(usize, usize, usize)> for Anchor {
    fn from((line, start_column, end_column): (usize, usize, usize)) -> Self {
        Anchor::Span {
            line,
            start_column,
            end_column,
        }
    }
}

/// Output sequence for one lint pass
///
/// Normalizes every anchor shape into a [`Range`] before appending.
pub struct DiagnosticSink<'s, 't> {
    source: &'s SourceText<'t>,
    diagnostics: Vec<Diagnostic>,
}

impl<'s, 't> DiagnosticSink<'s, 't> {
    pub fn new(source: &'s SourceText<'t>) -> Self {
        Self {
            source,
            diagnostics: Vec::new(),
        }
    }

    /// Resolve an anchor into a range inside the document
    ///
    /// A span with an end column of 0 has no usable end and is inferred like a
    /// point. Reversed or out-of-range ends are errors.
    pub fn resolve(&self, anchor: Anchor) -> Result<Range, LintError> {
        match anchor {
            Anchor::Range(range) => self.source.check_range(range),
            Anchor::Point { line, column }
            | Anchor::Span {
                line,
                start_column: column,
                end_column: 0,
            } => self.source.infer_range(line, column),
            Anchor::Span {
                line,
                start_column,
                end_column,
            } => self.source.check_range(Range {
                start: Position::new(line, start_column),
                end: Position::new(line, end_column),
            }),
        }
    }

    /// Append one diagnostic
    pub fn add(
        &mut self,
        rule_id: &str,
        severity: Severity,
        message: &str,
        anchor: impl Into<Anchor>,
    ) -> Result<(), LintError> {
        let range = self.resolve(anchor.into())?;
        self.diagnostics
            .push(Diagnostic::new(rule_id, severity, message, range));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
