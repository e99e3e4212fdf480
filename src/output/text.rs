//! Human-readable text output formatter

use super::OutputFormatter;
use crate::diagnostic::{Diagnostic, Severity};
use crate::engine::LintResult;
use colored::*;
use std::path::Path;

/// Text formatter with optional color support
pub struct TextFormatter {
    /// Enable colored output
    pub colored: bool,

    /// Show suggested replacements
    pub show_fixes: bool,

    /// Show statistics
    pub show_stats: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            colored: true,
            show_fixes: true,
            show_stats: true,
        }
    }
}

impl TextFormatter {
    fn severity_str(&self, severity: Severity) -> ColoredString {
        let s = format!("{}", severity);
        if !self.colored {
            return s.normal();
        }
        match severity {
            Severity::Error => s.red().bold(),
            Severity::Warning => s.yellow().bold(),
            Severity::Info => s.blue(),
        }
    }

    /// `file:line:col`, one-based
    fn format_location(&self, file: &Path, diag: &Diagnostic) -> String {
        format!(
            "{}:{}:{}",
            file.display(),
            diag.range.start.row + 1,
            diag.range.start.column + 1
        )
    }

    fn count_str(&self, count: usize, singular: &str, plural: &str, color: Color) -> String {
        let s = format!("{} {}", count, if count == 1 { singular } else { plural });
        if self.colored {
            s.color(color).to_string()
        } else {
            s
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &LintResult) -> String {
        let mut output = String::new();

        for file in result.files.iter().filter(|f| !f.diagnostics.is_empty()) {
            if self.colored {
                output.push_str(&format!("{}\n", file.path.display().to_string().underline()));
            } else {
                output.push_str(&format!("{}\n", file.path.display()));
            }

            for diag in &file.diagnostics {
                output.push_str(&self.format_diagnostic(&file.path, diag));
            }
            output.push('\n');
        }

        if self.show_stats {
            output.push_str(&format!(
                "{} {} processed",
                result.files_processed,
                if result.files_processed == 1 {
                    "file"
                } else {
                    "files"
                }
            ));

            let mut counts = Vec::new();
            if result.error_count > 0 {
                counts.push(self.count_str(result.error_count, "error", "errors", Color::Red));
            }
            if result.warning_count > 0 {
                counts.push(self.count_str(
                    result.warning_count,
                    "warning",
                    "warnings",
                    Color::Yellow,
                ));
            }
            if result.info_count > 0 {
                counts.push(self.count_str(result.info_count, "info", "infos", Color::Blue));
            }

            if !counts.is_empty() {
                output.push_str(&format!(": {}", counts.join(", ")));
            }
            output.push('\n');

            output.push_str(&format!(
                "Finished in {:.2}s\n",
                result.duration.as_secs_f64()
            ));
        }

        output
    }

    fn format_diagnostic(&self, file: &Path, diag: &Diagnostic) -> String {
        let mut output = format!(
            "{}: {}[{}]: {}\n",
            self.format_location(file, diag),
            self.severity_str(diag.severity),
            if self.colored {
                diag.rule_id.cyan().to_string()
            } else {
                diag.rule_id.clone()
            },
            diag.message
        );

        if self.show_fixes {
            if let Some(suggestion) = &diag.suggestion {
                let label = if self.colored {
                    "help".green().bold().to_string()
                } else {
                    "help".to_string()
                };
                output.push_str(&format!("   = {}: replace with `{}`\n", label, suggestion));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LintReport;
    use crate::source::Range;
    use pretty_assertions::assert_eq;

    fn plain() -> TextFormatter {
        TextFormatter {
            colored: false,
            ..TextFormatter::default()
        }
    }

    fn casing_diag() -> Diagnostic {
        Diagnostic::new(
            "casing",
            Severity::Warning,
            "Incorrect capitalization for keyword. Did you mean: eoi",
            Range::single_line(2, 4, 7),
        )
    }

    #[test]
    fn test_format_diagnostic_is_one_based() {
        let formatter = plain();
        let output = formatter.format_diagnostic(Path::new("main.ase"), &casing_diag());
        assert_eq!(
            output,
            "main.ase:3:5: warning[casing]: Incorrect capitalization for keyword. Did you mean: eoi\n   = help: replace with `eoi`\n"
        );
    }

    #[test]
    fn test_no_help_without_suggestion() {
        let formatter = plain();
        let diag = Diagnostic::new(
            "bracket-match",
            Severity::Error,
            "Missing a matching character",
            Range::single_line(0, 0, 1),
        );
        let output = formatter.format_diagnostic(Path::new("a.ase"), &diag);
        assert_eq!(output, "a.ase:1:1: error[bracket-match]: Missing a matching character\n");
    }

    #[test]
    fn test_format_summary() {
        let formatter = plain();
        let report = LintReport {
            diagnostics: vec![casing_diag()],
            ..LintReport::default()
        };
        let result = LintResult::from_report(Path::new("main.ase"), report);

        let output = formatter.format(&result);
        assert!(output.starts_with("main.ase\nmain.ase:3:5: warning[casing]"));
        assert!(output.contains("1 file processed: 1 warning\n"));
        assert!(output.contains("Finished in"));
    }

    #[test]
    fn test_suggestions_and_summary_can_be_hidden() {
        let formatter = TextFormatter {
            show_fixes: false,
            show_stats: false,
            ..plain()
        };
        let report = LintReport {
            diagnostics: vec![casing_diag()],
            ..LintReport::default()
        };
        let result = LintResult::from_report(Path::new("main.ase"), report);

        assert_eq!(
            formatter.format(&result),
            "main.ase\nmain.ase:3:5: warning[casing]: Incorrect capitalization for keyword. Did you mean: eoi\n\n"
        );
    }

    #[test]
    fn test_clean_files_are_not_listed() {
        let formatter = plain();
        let result = LintResult::from_report(Path::new("clean.ase"), LintReport::default());
        let output = formatter.format(&result);
        assert!(output.starts_with("1 file processed\n"));
    }
}
