//! Core linter engine

use crate::classifier::{LexicalClassifier, ScopeClassifier};
use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticSink, Severity};
use crate::error::LintError;
use crate::rules::{LintContext, RuleKind};
use crate::source::{Position, Range, SourceText};
use crate::table::RuleTable;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Rule ID of the notice listing families skipped for size
pub const DEGRADED_RULE_ID: &str = "disabled-rules";

/// Rule ID for files that could not be read
pub const FILE_READ_ERROR_ID: &str = "file-read-error";

/// Rule ID for lint passes aborted by an error
pub const LINT_ERROR_ID: &str = "lint-error";

/// Per-rule timing statistics
#[derive(Debug, Clone, Default)]
pub struct RuleTiming {
    /// Rule ID
    pub rule_id: String,
    /// Total time spent on this rule
    pub total_time: Duration,
    /// Number of lint passes the rule ran in
    pub run_count: usize,
    /// Number of pattern matches examined
    pub match_count: usize,
    /// Number of diagnostics emitted
    pub diagnostic_count: usize,
}

impl RuleTiming {
    /// Create a new timing entry
    pub fn new(rule_id: &str) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            ..Default::default()
        }
    }

    /// Average time per run
    pub fn avg_time(&self) -> Duration {
        if self.run_count > 0 {
            self.total_time / self.run_count as u32
        } else {
            Duration::ZERO
        }
    }

    fn absorb(&mut self, other: &RuleTiming) {
        self.total_time += other.total_time;
        self.run_count += other.run_count;
        self.match_count += other.match_count;
        self.diagnostic_count += other.diagnostic_count;
    }
}

/// Outcome of one lint pass over one document
#[derive(Debug, Clone, Default)]
pub struct LintReport {
    /// Diagnostics in emission order, the size notice first when present
    pub diagnostics: Vec<Diagnostic>,
    /// Families skipped because the document was too large
    pub disabled: Vec<RuleKind>,
    /// Timings of the families that ran
    pub timings: Vec<RuleTiming>,
}

impl LintReport {
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Diagnostics for one file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
    pub disabled: Vec<RuleKind>,
}

/// Result of linting a set of files
#[derive(Debug, Default)]
pub struct LintResult {
    /// Per-file diagnostics, in input order
    pub files: Vec<FileReport>,

    /// Files processed
    pub files_processed: usize,

    /// Files with errors
    pub files_with_errors: usize,

    /// Files with warnings
    pub files_with_warnings: usize,

    /// Total errors
    pub error_count: usize,

    /// Total warnings
    pub warning_count: usize,

    /// Total info messages
    pub info_count: usize,

    /// Processing duration
    pub duration: Duration,

    /// Per-rule timing statistics (rule_id -> timing)
    pub rule_timings: HashMap<String, RuleTiming>,
}

impl LintResult {
    /// Result for a single file
    pub fn from_report(path: &Path, report: LintReport) -> Self {
        let mut result = Self {
            files_processed: 1,
            ..Self::default()
        };

        for diag in &report.diagnostics {
            match diag.severity {
                Severity::Error => result.error_count += 1,
                Severity::Warning => result.warning_count += 1,
                Severity::Info => result.info_count += 1,
            }
        }
        if result.error_count > 0 {
            result.files_with_errors = 1;
        }
        if result.warning_count > 0 {
            result.files_with_warnings = 1;
        }

        for timing in &report.timings {
            result
                .rule_timings
                .entry(timing.rule_id.clone())
                .or_insert_with(|| RuleTiming::new(&timing.rule_id))
                .absorb(timing);
        }

        result.files.push(FileReport {
            path: path.to_path_buf(),
            diagnostics: report.diagnostics,
            disabled: report.disabled,
        });
        result
    }

    /// Get exit code (0 = success, 1 = warnings, 2 = errors)
    pub fn exit_code(&self) -> i32 {
        if self.error_count > 0 {
            2
        } else if self.warning_count > 0 {
            1
        } else {
            0
        }
    }

    /// All diagnostics with their file
    pub fn diagnostics(&self) -> impl Iterator<Item = (&Path, &Diagnostic)> {
        self.files
            .iter()
            .flat_map(|f| f.diagnostics.iter().map(move |d| (f.path.as_path(), d)))
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: LintResult) {
        self.files.extend(other.files);
        self.files_processed += other.files_processed;
        self.files_with_errors += other.files_with_errors;
        self.files_with_warnings += other.files_with_warnings;
        self.error_count += other.error_count;
        self.warning_count += other.warning_count;
        self.info_count += other.info_count;

        for (rule_id, timing) in other.rule_timings {
            self.rule_timings
                .entry(rule_id)
                .or_insert_with(|| RuleTiming::new(&timing.rule_id))
                .absorb(&timing);
        }
    }

    /// Get rule timings sorted by total time (descending)
    pub fn sorted_timings(&self) -> Vec<&RuleTiming> {
        let mut timings: Vec<_> = self.rule_timings.values().collect();
        timings.sort_by(|a, b| b.total_time.cmp(&a.total_time));
        timings
    }

    /// Format timing statistics as a string
    pub fn format_timings(&self) -> String {
        let timings = self.sorted_timings();
        if timings.is_empty() {
            return "No timing data available".to_string();
        }

        let mut output = String::new();
        output.push_str("Rule Timing Statistics:\n");
        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>8} {:>10} {:>12}\n",
            "Rule ID", "Total", "Avg", "Runs", "Matches", "Diagnostics"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for timing in timings {
            let total_ms = timing.total_time.as_secs_f64() * 1000.0;
            let avg_us = timing.avg_time().as_secs_f64() * 1_000_000.0;

            output.push_str(&format!(
                "{:<20} {:>10.2}ms {:>10.2}µs {:>8} {:>10} {:>12}\n",
                timing.rule_id,
                total_ms,
                avg_us,
                timing.run_count,
                timing.match_count,
                timing.diagnostic_count
            ));
        }

        output
    }
}

/// The main linter engine
///
/// Holds only immutable settings; every lint pass builds its own context, so
/// one engine can lint any number of documents, concurrently or not.
pub struct Engine {
    /// Validated rule table
    table: RuleTable,

    /// Enabled families in execution order
    rules: Vec<RuleKind>,

    /// Severity overrides
    severities: HashMap<RuleKind, Severity>,

    /// Lint files in parallel
    parallel: bool,

    /// Number of parallel jobs (0 = auto-detect)
    jobs: usize,
}

impl Engine {
    /// Create an engine running every family
    pub fn new(table: RuleTable) -> Self {
        Self {
            table,
            rules: RuleKind::ALL.to_vec(),
            severities: HashMap::new(),
            parallel: false,
            jobs: 0,
        }
    }

    /// Create an engine from configuration, validating its rule table
    pub fn from_config(config: &Config) -> Result<Self, LintError> {
        let table = config.rule_table()?;
        let rules = RuleKind::ALL
            .into_iter()
            .filter(|kind| config.is_rule_enabled(kind.id()))
            .collect();

        let severities = RuleKind::ALL
            .into_iter()
            .filter_map(|kind| Some((kind, config.get_severity_override(kind)?)))
            .collect();

        Ok(Self {
            table,
            rules,
            severities,
            parallel: config.engine.parallel,
            jobs: config.engine.jobs,
        })
    }

    /// Restrict the engine to the given families
    pub fn with_rules(mut self, rules: &[RuleKind]) -> Self {
        self.rules = RuleKind::ALL
            .into_iter()
            .filter(|kind| rules.contains(kind))
            .collect();
        self
    }

    /// Override the severity of a family
    pub fn with_severity(mut self, kind: RuleKind, severity: Severity) -> Self {
        self.severities.insert(kind, severity);
        self
    }

    /// Enable or disable parallel file linting
    pub fn with_parallel(mut self, parallel: bool, jobs: usize) -> Self {
        self.parallel = parallel;
        self.jobs = jobs;
        self
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn rules(&self) -> &[RuleKind] {
        &self.rules
    }

    fn severity_for(&self, kind: RuleKind) -> Severity {
        self.severities
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_severity())
    }

    /// Lint one document
    ///
    /// Families run in order. A family whose line threshold the document
    /// exceeds is skipped and named in a leading `info` diagnostic.
    pub fn lint(
        &self,
        text: &str,
        classifier: &dyn ScopeClassifier,
    ) -> Result<LintReport, LintError> {
        let source = SourceText::new(text);
        let ctx = LintContext::new(&source, classifier, &self.table);
        let mut sink = DiagnosticSink::new(&source);
        let line_count = source.line_count();

        let mut disabled = Vec::new();
        let mut timings = Vec::new();

        for &kind in &self.rules {
            if let Some(max_lines) = self.table.thresholds.max_lines(kind) {
                if line_count > max_lines {
                    info!(
                        "Skipping {} rule: {} lines exceeds limit of {}",
                        kind, line_count, max_lines
                    );
                    disabled.push(kind);
                    continue;
                }
            }

            let before = sink.len();
            let start = Instant::now();
            let matches = kind.run(&ctx, &mut sink, self.severity_for(kind))?;
            let elapsed = start.elapsed();

            let emitted = sink.len() - before;
            debug!(
                "{} rule: {} matches, {} diagnostics in {:?}",
                kind, matches, emitted, elapsed
            );
            timings.push(RuleTiming {
                rule_id: kind.id().to_string(),
                total_time: elapsed,
                run_count: 1,
                match_count: matches,
                diagnostic_count: emitted,
            });
        }

        let mut diagnostics = sink.into_diagnostics();
        if !disabled.is_empty() {
            diagnostics.insert(0, degraded_notice(&disabled));
        }

        Ok(LintReport {
            diagnostics,
            disabled,
            timings,
        })
    }

    /// Lint one document with the built-in lexical classifier
    pub fn lint_text(&self, text: &str) -> Result<LintReport, LintError> {
        let keywords = self.table.keyword_texts();
        let classifier = LexicalClassifier::new(text, keywords.as_slice());
        self.lint(text, &classifier)
    }

    /// Lint several documents, each with its own classifier
    ///
    /// Results come back in input order.
    pub fn lint_batch<C>(&self, documents: &[(&str, C)]) -> Vec<Result<LintReport, LintError>>
    where
        C: ScopeClassifier,
    {
        if self.parallel {
            self.install(|| {
                documents
                    .par_iter()
                    .map(|(text, classifier)| self.lint(text, classifier))
                    .collect()
            })
        } else {
            documents
                .iter()
                .map(|(text, classifier)| self.lint(text, classifier))
                .collect()
        }
    }

    /// Lint files from disk with the lexical classifier
    pub fn lint_files(&self, files: &[PathBuf]) -> LintResult {
        let start = Instant::now();

        let results: Vec<LintResult> = if self.parallel {
            self.install(|| files.par_iter().map(|f| self.lint_file(f)).collect())
        } else {
            files.iter().map(|f| self.lint_file(f)).collect()
        };

        let mut combined = LintResult::default();
        for result in results {
            combined.merge(result);
        }

        combined.duration = start.elapsed();
        combined
    }

    /// Lint a single file
    pub fn lint_file(&self, path: &Path) -> LintResult {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return LintResult::from_report(
                    path,
                    failure_report(FILE_READ_ERROR_ID, &format!("Failed to read file: {}", e)),
                );
            }
        };

        match self.lint_text(&content) {
            Ok(report) => LintResult::from_report(path, report),
            Err(e) => LintResult::from_report(
                path,
                failure_report(LINT_ERROR_ID, &format!("Lint failed: {}", e)),
            ),
        }
    }

    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        let threads = if self.jobs > 0 {
            self.jobs
        } else {
            num_cpus::get()
        };
        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(op),
            Err(e) => {
                warn!("Falling back to the global thread pool: {}", e);
                op()
            }
        }
    }
}

/// Leading notice naming the families skipped for size
fn degraded_notice(disabled: &[RuleKind]) -> Diagnostic {
    let names: Vec<&str> = disabled.iter().map(|k| k.id()).collect();
    Diagnostic::new(
        DEGRADED_RULE_ID,
        Severity::Info,
        &format!("Disabled for large documents: {}", names.join(", ")),
        Range::empty(Position::default()),
    )
}

fn failure_report(rule_id: &str, message: &str) -> LintReport {
    LintReport {
        diagnostics: vec![Diagnostic::new(
            rule_id,
            Severity::Error,
            message,
            Range::empty(Position::default()),
        )],
        ..LintReport::default()
    }
}
