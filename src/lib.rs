//! ASE Lint - scope-aware style linter for ASE scripts
//!
//! Scans a document with the patterns of a [`RuleTable`], asks a
//! [`ScopeClassifier`] what each match sits in, and reports style problems as
//! [`Diagnostic`]s. Nothing is ever rewritten; fixes are suggestions only.
//!
//! # Architecture
//!
//! ```text
//! CLI/API -> Engine -> RuleKind (casing, spacing, bracket-match, notation)
//!                        |-> Scanner (patterns from the RuleTable)
//!                        |-> ScopeClassifier (host tokenizer or LexicalClassifier)
//!                        '-> DiagnosticSink
//! ```
//!
//! # Example
//!
//! ```
//! use ase_lint::{Engine, RuleTable};
//!
//! let engine = Engine::new(RuleTable::ase().unwrap());
//! let report = engine.lint_text("if ( $oNode == EOI )").unwrap();
//! assert_eq!(report.diagnostics[0].suggestion.as_deref(), Some("eoi"));
//! ```

pub mod classifier;
pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod files;
pub mod output;
pub mod rules;
pub mod scanner;
pub mod scope;
pub mod source;
pub mod table;

// Re-export main types
pub use classifier::{LexicalClassifier, ScopeClassifier};
pub use config::{Config, ConfigError};
pub use diagnostic::{Anchor, Diagnostic, DiagnosticSink, Severity};
pub use engine::{Engine, FileReport, LintReport, LintResult, RuleTiming};
pub use error::LintError;
pub use output::{JsonFormatter, OutputFormatter, TextFormatter};
pub use rules::{LintContext, RuleKind};
pub use scanner::{scan, Match, Pattern};
pub use source::{Position, Range, SourceText};
pub use table::{RuleTable, TableConfig};
