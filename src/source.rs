//! Document text with row/column addressing

use crate::error::LintError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based position in a document
///
/// `column` counts characters (not bytes) from the start of the line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Line index
    pub row: usize,
    /// Character offset within the line
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// Half-open span between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    /// Exclusive
    pub end: Position,
}

impl Range {
    /// Create a range; `start` must not come after `end`
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start <= end, "reversed range {}-{}", start, end);
        Self { start, end }
    }

    /// Range on a single line between two columns
    pub fn single_line(row: usize, start_column: usize, end_column: usize) -> Self {
        Self::new(
            Position::new(row, start_column),
            Position::new(row, end_column),
        )
    }

    /// One-character range starting at `position`
    pub fn char_at(position: Position) -> Self {
        Self::single_line(position.row, position.column, position.column + 1)
    }

    /// Zero-width range at `position`
    pub fn empty(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check whether `position` lies inside the range (end excluded)
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position < self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Borrowed document text with a line index
///
/// The text itself stays owned by the caller.
#[derive(Debug, Clone)]
pub struct SourceText<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> SourceText<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.char_indices()
                .filter(|(_, c)| *c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self { text, line_starts }
    }

    /// Full document contents
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Number of lines (an empty document has one empty line)
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Line content without its terminator
    pub fn line(&self, row: usize) -> Option<&'a str> {
        let start = *self.line_starts.get(row)?;
        let end = self
            .line_starts
            .get(row + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());
        let line = &self.text[start..end];
        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    /// Line length in characters
    pub fn line_len(&self, row: usize) -> Option<usize> {
        self.line(row).map(|l| l.chars().count())
    }

    /// Check that a position addresses a character or a line end
    pub fn contains(&self, position: Position) -> bool {
        self.line_len(position.row)
            .is_some_and(|len| position.column <= len)
    }

    /// Fail unless `position` is inside the document
    pub fn check(&self, position: Position) -> Result<(), LintError> {
        if self.contains(position) {
            Ok(())
        } else {
            Err(self.out_of_range(position))
        }
    }

    /// Fail unless both ends are inside the document and in order
    pub fn check_range(&self, range: Range) -> Result<Range, LintError> {
        self.check(range.start)?;
        self.check(range.end)?;
        if range.end < range.start {
            return Err(LintError::ReversedRange {
                start: range.start,
                end: range.end,
            });
        }
        Ok(range)
    }

    /// Convert a byte offset (on a char boundary) into a position
    pub fn position_at(&self, offset: usize) -> Position {
        let row = match self.line_starts.binary_search(&offset) {
            Ok(row) => row,
            Err(next) => next - 1,
        };
        let start = self.line_starts[row];
        let column = self.text[start..offset.min(self.text.len())]
            .chars()
            .count();
        Position::new(row, column)
    }

    /// Convert a position into a byte offset
    pub fn offset_of(&self, position: Position) -> Result<usize, LintError> {
        let line = self
            .line(position.row)
            .ok_or_else(|| self.out_of_range(position))?;
        let start = self.line_starts[position.row];

        match line.char_indices().nth(position.column) {
            Some((idx, _)) => Ok(start + idx),
            None if line.chars().count() == position.column => Ok(start + line.len()),
            None => Err(self.out_of_range(position)),
        }
    }

    /// Text covered by a range
    pub fn text_in_range(&self, range: Range) -> Result<&'a str, LintError> {
        let start = self.offset_of(range.start)?;
        let end = self.offset_of(range.end)?;
        Ok(&self.text[start..end])
    }

    /// Character at a position, if it is not a line end
    pub fn char_at(&self, position: Position) -> Option<char> {
        self.line(position.row)?.chars().nth(position.column)
    }

    /// Reasonable highlight for a bare (line, column) pair
    ///
    /// Covers the run of non-whitespace starting at the column, or the rest of
    /// the line when the column sits on whitespace. Column 0 with no
    /// non-whitespace run highlights from the first non-blank character.
    pub fn infer_range(&self, row: usize, column: usize) -> Result<Range, LintError> {
        let requested = Position::new(row, column);
        let line = self.line(row).ok_or_else(|| self.out_of_range(requested))?;
        let chars: Vec<char> = line.chars().collect();
        if column > chars.len() {
            return Err(self.out_of_range(requested));
        }

        let word_len = chars[column..]
            .iter()
            .take_while(|c| !c.is_whitespace())
            .count();
        if word_len > 0 {
            return Ok(Range::single_line(row, column, column + word_len));
        }

        let start = if column == 0 {
            chars
                .iter()
                .position(|c| !c.is_whitespace())
                .unwrap_or(chars.len())
        } else {
            column
        };
        Ok(Range::single_line(row, start, chars.len()))
    }

    fn out_of_range(&self, position: Position) -> LintError {
        LintError::PositionOutOfRange {
            position,
            line_count: self.line_count(),
        }
    }
}
