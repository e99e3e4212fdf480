//! Pattern scanning over document text
//!
//! All regular-expression matching goes through this module. Patterns are
//! compiled once when the rule table is built; scanning yields matches lazily,
//! left to right, without overlap.

use crate::error::LintError;
use crate::source::{Range, SourceText};
use regex::{Captures, CaptureMatches, Regex, RegexBuilder};

/// A validated, compiled pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a case-sensitive pattern
    ///
    /// `origin` names the table entry the pattern came from, for error
    /// messages.
    pub fn new(source: &str, origin: &str) -> Result<Self, LintError> {
        Self::build(source, origin, false)
    }

    /// Compile a case-insensitive pattern
    pub fn case_insensitive(source: &str, origin: &str) -> Result<Self, LintError> {
        Self::build(source, origin, true)
    }

    fn build(source: &str, origin: &str, case_insensitive: bool) -> Result<Self, LintError> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| LintError::InvalidPattern {
                origin: origin.to_string(),
                pattern: source.to_string(),
                source: e,
            })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// One pattern match
#[derive(Debug)]
pub struct Match<'t> {
    /// Row/column span of the match
    pub range: Range,
    /// Byte span of the match in the document text
    pub byte_range: std::ops::Range<usize>,
    /// Matched text
    pub text: &'t str,
    captures: Captures<'t>,
}

impl Match<'_> {
    /// Check whether a named group took part in the match
    pub fn has_group(&self, name: &str) -> bool {
        self.captures.name(name).is_some()
    }
}

/// Lazy iterator over the matches of one pattern
pub struct Scanner<'a, 't> {
    source: &'a SourceText<'t>,
    inner: CaptureMatches<'a, 't>,
}

impl<'t> Iterator for Scanner<'_, 't> {
    type Item = Match<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let captures = self.inner.next()?;
        let whole = captures.get(0)?;
        let range = Range::new(
            self.source.position_at(whole.start()),
            self.source.position_at(whole.end()),
        );
        Some(Match {
            range,
            byte_range: whole.range(),
            text: whole.as_str(),
            captures,
        })
    }
}

/// Scan the whole document for `pattern`
///
/// Single pass; call again to rescan.
pub fn scan<'a, 't>(source: &'a SourceText<'t>, pattern: &'a Pattern) -> Scanner<'a, 't> {
    Scanner {
        source,
        inner: pattern.regex.captures_iter(source.text()),
    }
}
