//! Error types for rule tables and lint passes

use crate::source::Position;
use thiserror::Error;

/// Error raised while building a rule table or running a lint pass
#[derive(Debug, Error)]
pub enum LintError {
    #[error("Invalid pattern '{pattern}' in {origin}: {source}")]
    InvalidPattern {
        origin: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Position {position} is outside the document ({line_count} lines)")]
    PositionOutOfRange {
        position: Position,
        line_count: usize,
    },

    #[error("Range {start}-{end} ends before it starts")]
    ReversedRange { start: Position, end: Position },

    #[error("Invalid rule table: {0}")]
    InvalidTable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let err = LintError::PositionOutOfRange {
            position: Position::new(4, 2),
            line_count: 3,
        };
        assert_eq!(
            err.to_string(),
            "Position 4:2 is outside the document (3 lines)"
        );
    }

    #[test]
    fn test_invalid_pattern_display() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = LintError::InvalidPattern {
            origin: "spacer #0".to_string(),
            pattern: "(".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid pattern '(' in spacer #0"));
    }
}
