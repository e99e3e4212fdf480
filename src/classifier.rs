//! Scope classification
//!
//! The engine never tokenizes ASE itself: it asks a [`ScopeClassifier`] for
//! the scope path of each position it cares about. Editor hosts plug in their
//! grammar; the [`LexicalClassifier`] is a lightweight stand-in used by the
//! command line tool.

use crate::scope::{ScopePath, ROOT_SCOPE};
use crate::source::Position;
use std::collections::HashSet;

/// Maps a document position to its scope path
///
/// Implementations must be pure: the same position always yields the same
/// path, and classification has no side effects.
pub trait ScopeClassifier: Send + Sync {
    fn classify(&self, position: Position) -> ScopePath;
}

impl<F> ScopeClassifier for F
where
    F: Fn(Position) -> ScopePath + Send + Sync,
{
    fn classify(&self, position: Position) -> ScopePath {
        self(position)
    }
}

pub const LINE_COMMENT_SCOPE: &str = "comment.line.double-slash.ase";
pub const BLOCK_COMMENT_SCOPE: &str = "comment.block.ase";
pub const DOUBLE_STRING_SCOPE: &str = "string.quoted.double.ase";
pub const SINGLE_STRING_SCOPE: &str = "string.quoted.single.ase";
pub const INLINE_CODE_SCOPE: &str = "meta.embedded.inlinecode.ase";
pub const OPERATOR_SCOPE: &str = "keyword.operator.aseOperator.ase";
pub const CONSTANT_SCOPE: &str = "constant.language.ase";
pub const NUMERIC_SCOPE: &str = "constant.numeric.ase";
pub const VARIABLE_SCOPE: &str = "variable.other.ase";

const OPERATOR_CHARS: &str = "+-*/=<>!&|%^~";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    BlockComment,
    InlineCode,
}

/// Heuristic classifier built from a single lexical pass
///
/// Recognises `//` and `/* */` comments, single and double quoted strings,
/// backtick-fenced inline code, operator characters, `$` variables, numbers
/// and the configured keyword constants. Everything else is plain code.
#[derive(Debug, Clone)]
pub struct LexicalClassifier {
    /// Inner scope per line per character, `None` for plain code
    lines: Vec<Vec<Option<&'static str>>>,
}

impl LexicalClassifier {
    pub fn new<S: AsRef<str>>(text: &str, keywords: &[S]) -> Self {
        let keywords: HashSet<String> = keywords
            .iter()
            .map(|k| k.as_ref().to_lowercase())
            .collect();

        let mut state = State::Code;
        let lines = text
            .split('\n')
            .map(|line| {
                let line = line.strip_suffix('\r').unwrap_or(line);
                let chars: Vec<char> = line.chars().collect();
                classify_line(&chars, &mut state, &keywords)
            })
            .collect();

        Self { lines }
    }

    fn inner_scope(&self, position: Position) -> Option<&'static str> {
        *self.lines.get(position.row)?.get(position.column)?
    }
}

impl ScopeClassifier for LexicalClassifier {
    fn classify(&self, position: Position) -> ScopePath {
        let mut path = vec![ROOT_SCOPE.to_string()];
        if let Some(scope) = self.inner_scope(position) {
            path.push(scope.to_string());
        }
        path
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn classify_line(
    chars: &[char],
    state: &mut State,
    keywords: &HashSet<String>,
) -> Vec<Option<&'static str>> {
    let mut scopes = vec![None; chars.len()];
    let mut i = 0;

    while i < chars.len() {
        match *state {
            State::BlockComment => {
                scopes[i] = Some(BLOCK_COMMENT_SCOPE);
                if chars[i] == '*' && chars.get(i + 1) == Some(&'/') {
                    scopes[i + 1] = Some(BLOCK_COMMENT_SCOPE);
                    i += 1;
                    *state = State::Code;
                }
                i += 1;
            }
            State::InlineCode => {
                scopes[i] = Some(INLINE_CODE_SCOPE);
                if chars[i] == '`' {
                    *state = State::Code;
                }
                i += 1;
            }
            State::Code => {
                let c = chars[i];
                let next = chars.get(i + 1).copied();

                if c == '/' && next == Some('/') {
                    scopes[i..].fill(Some(LINE_COMMENT_SCOPE));
                    break;
                } else if c == '/' && next == Some('*') {
                    scopes[i] = Some(BLOCK_COMMENT_SCOPE);
                    scopes[i + 1] = Some(BLOCK_COMMENT_SCOPE);
                    *state = State::BlockComment;
                    i += 2;
                } else if c == '`' {
                    scopes[i] = Some(INLINE_CODE_SCOPE);
                    *state = State::InlineCode;
                    i += 1;
                } else if c == '"' || c == '\'' {
                    let scope = if c == '"' {
                        DOUBLE_STRING_SCOPE
                    } else {
                        SINGLE_STRING_SCOPE
                    };
                    let mut end = i + 1;
                    while end < chars.len() && chars[end] != c {
                        if chars[end] == '\\' {
                            end += 1;
                        }
                        end += 1;
                    }
                    let end = (end + 1).min(chars.len());
                    scopes[i..end].fill(Some(scope));
                    i = end;
                } else if c == '$' && next.is_some_and(is_word_char) {
                    let len = 1 + chars[i + 1..].iter().take_while(|c| is_word_char(**c)).count();
                    scopes[i..i + len].fill(Some(VARIABLE_SCOPE));
                    i += len;
                } else if OPERATOR_CHARS.contains(c) {
                    scopes[i] = Some(OPERATOR_SCOPE);
                    i += 1;
                } else if c.is_ascii_digit() {
                    let len = chars[i..].iter().take_while(|c| is_word_char(**c)).count();
                    scopes[i..i + len].fill(Some(NUMERIC_SCOPE));
                    i += len;
                } else if is_word_char(c) {
                    let len = chars[i..].iter().take_while(|c| is_word_char(**c)).count();
                    let word: String = chars[i..i + len].iter().collect();
                    if keywords.contains(&word.to_lowercase()) {
                        scopes[i..i + len].fill(Some(CONSTANT_SCOPE));
                    }
                    i += len;
                } else {
                    i += 1;
                }
            }
        }
    }

    scopes
}
