//! Rule families
//!
//! Each family is a scanning algorithm driven by the [`RuleTable`]. Families
//! only read the shared inputs in [`LintContext`] and write to the sink they
//! are handed, so they can be run, disabled and tested independently.

pub mod brackets;
pub mod casing;
pub mod notation;
pub mod spacing;

use crate::classifier::ScopeClassifier;
use crate::diagnostic::{DiagnosticSink, Severity};
use crate::error::LintError;
use crate::scope::{self, ScopePath};
use crate::source::{Position, SourceText};
use crate::table::RuleTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inputs for one lint pass
///
/// Built fresh for every pass; nothing in it outlives the call.
pub struct LintContext<'a, 't> {
    pub source: &'a SourceText<'t>,
    pub classifier: &'a dyn ScopeClassifier,
    pub table: &'a RuleTable,
}

impl<'a, 't> LintContext<'a, 't> {
    pub fn new(
        source: &'a SourceText<'t>,
        classifier: &'a dyn ScopeClassifier,
        table: &'a RuleTable,
    ) -> Self {
        Self {
            source,
            classifier,
            table,
        }
    }

    /// Scope path at a position
    ///
    /// Positions outside the document are rejected before the classifier is
    /// consulted.
    pub fn scope_at(&self, position: Position) -> Result<ScopePath, LintError> {
        self.source.check(position)?;
        Ok(self.classifier.classify(position))
    }

    pub fn is_typical_at(&self, position: Position) -> Result<bool, LintError> {
        Ok(scope::is_typical(&self.scope_at(position)?))
    }
}

/// The closed set of rule families
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    Casing,
    Spacing,
    BracketMatch,
    Notation,
}

impl RuleKind {
    /// All families in execution order
    pub const ALL: [RuleKind; 4] = [
        RuleKind::Casing,
        RuleKind::Spacing,
        RuleKind::BracketMatch,
        RuleKind::Notation,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            RuleKind::Casing => casing::ID,
            RuleKind::Spacing => spacing::ID,
            RuleKind::BracketMatch => brackets::ID,
            RuleKind::Notation => notation::ID,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RuleKind::Casing => "Keywords and constants must use their canonical capitalization",
            RuleKind::Spacing => "Operators must be surrounded by whitespace",
            RuleKind::BracketMatch => "Every opening bracket needs a closing bracket",
            RuleKind::Notation => {
                "Variables use Hungarian notation: a lowercase tag followed by a capitalized word"
            }
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            RuleKind::BracketMatch => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// Run the family over the document
    ///
    /// Returns the number of pattern matches examined.
    pub fn run(
        &self,
        ctx: &LintContext<'_, '_>,
        sink: &mut DiagnosticSink<'_, '_>,
        severity: Severity,
    ) -> Result<usize, LintError> {
        match self {
            RuleKind::Casing => casing::run(ctx, sink, severity),
            RuleKind::Spacing => spacing::run(ctx, sink, severity),
            RuleKind::BracketMatch => brackets::run(ctx, sink, severity),
            RuleKind::Notation => notation::run(ctx, sink, severity),
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "casing" | "case" => Ok(RuleKind::Casing),
            "spacing" => Ok(RuleKind::Spacing),
            "bracket-match" | "brackets" => Ok(RuleKind::BracketMatch),
            "notation" => Ok(RuleKind::Notation),
            _ => Err(format!("Unknown rule: {}", s)),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::classifier::LexicalClassifier;
    use crate::diagnostic::Diagnostic;

    /// Run one family over `text` with the lexical classifier
    pub fn run_rule(kind: RuleKind, table: &RuleTable, text: &str) -> Vec<Diagnostic> {
        let keywords = table.keyword_texts();
        let classifier = LexicalClassifier::new(text, keywords.as_slice());
        run_rule_with(kind, table, text, &classifier)
    }

    pub fn run_rule_with(
        kind: RuleKind,
        table: &RuleTable,
        text: &str,
        classifier: &dyn ScopeClassifier,
    ) -> Vec<Diagnostic> {
        let source = SourceText::new(text);
        let ctx = LintContext::new(&source, classifier, table);
        let mut sink = DiagnosticSink::new(&source);
        kind.run(&ctx, &mut sink, kind.default_severity()).unwrap();
        sink.into_diagnostics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_ids_round_trip() {
        for kind in RuleKind::ALL {
            assert_eq!(kind.id().parse::<RuleKind>(), Ok(kind));
        }
        assert!("hungarian".parse::<RuleKind>().is_err());
    }

    #[test]
    fn test_default_severities() {
        assert_eq!(RuleKind::BracketMatch.default_severity(), Severity::Error);
        assert_eq!(RuleKind::Casing.default_severity(), Severity::Warning);
    }

    #[test]
    fn test_context_rejects_out_of_range_positions() {
        let table = RuleTable::ase().unwrap();
        let source = SourceText::new("abc");
        let classifier = |_: Position| vec![scope::ROOT_SCOPE.to_string()];
        let ctx = LintContext::new(&source, &classifier, &table);

        assert!(ctx.scope_at(Position::new(0, 3)).is_ok());
        assert!(matches!(
            ctx.scope_at(Position::new(2, 0)),
            Err(LintError::PositionOutOfRange { .. })
        ));
    }
}
