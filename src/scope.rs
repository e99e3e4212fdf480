//! Scope path predicates
//!
//! A scope path lists the syntactic categories of a position, outermost
//! first, e.g. `["source.ase", "comment.line.double-slash.ase"]`. Every rule
//! filters its matches through these predicates so comments, strings and
//! embedded inline code are never linted.

/// Root scope of every position inside an ASE document
pub const ROOT_SCOPE: &str = "source.ase";

/// Category of embedded foreign code
pub const INLINE_CODE: &str = "inlinecode";

/// Category of line and block comments
pub const COMMENT: &str = "comment";

/// Categories of string literals
pub const STRING_CATEGORIES: &[&str] = &["quoted", "string"];

/// Category of named constants
pub const CONSTANT: &str = "constant";

/// Ordered scope names, outermost first
pub type ScopePath = Vec<String>;

fn has_segment(scope: &str, category: &str) -> bool {
    scope.split('.').any(|segment| segment == category)
}

fn is_comment_scope(scope: &str) -> bool {
    let mut segments = scope.split('.');
    segments.next() == Some(COMMENT)
        && matches!(segments.next(), Some("line") | Some("block"))
}

/// Check whether the path belongs to ASE code
pub fn is_root<S: AsRef<str>>(path: &[S]) -> bool {
    path.first().is_some_and(|s| s.as_ref() == ROOT_SCOPE)
}

/// Check whether any scope below the root carries `category`
///
/// Inline code and comments shadow everything nested inside them: under an
/// inline-code scope only `inlinecode` is reported, under a comment scope
/// only `comment`.
pub fn contains_category<S: AsRef<str>>(path: &[S], category: &str) -> bool {
    if !is_root(path) || path.len() < 2 {
        return false;
    }

    let second = path[1].as_ref();
    if has_segment(second, INLINE_CODE) {
        return category == INLINE_CODE;
    }
    if is_comment_scope(second) {
        return category == COMMENT;
    }

    path.iter().any(|scope| has_segment(scope.as_ref(), category))
}

/// Check whether a position is eligible for linting
pub fn is_typical<S: AsRef<str>>(path: &[S]) -> bool {
    is_root(path)
        && !contains_category(path, INLINE_CODE)
        && !contains_category(path, COMMENT)
        && !STRING_CATEGORIES
            .iter()
            .any(|category| contains_category(path, category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_root() {
        assert!(is_root(&["source.ase"]));
        assert!(is_root(&["source.ase", "string.quoted.double.ase"]));
        assert!(!is_root(&["source.js"]));
        assert!(!is_root::<&str>(&[]));
    }

    #[test]
    fn test_contains_category_requires_two_entries() {
        assert!(!contains_category(&["source.ase"], "source"));
        assert!(contains_category(
            &["source.ase", "keyword.operator.aseOperator.ase"],
            "aseOperator"
        ));
        assert!(!contains_category(
            &["source.js", "keyword.operator.aseOperator.ase"],
            "aseOperator"
        ));
    }

    #[test]
    fn test_contains_category_matches_whole_segments() {
        let path = ["source.ase", "keyword.operator.aseOperator.ase"];
        assert!(!contains_category(&path, "aseOp"));
        assert!(contains_category(&path, "operator"));
    }

    #[test]
    fn test_inline_code_shadows_nested_scopes() {
        let path = [
            "source.ase",
            "meta.embedded.inlinecode.ase",
            "string.quoted.double.js",
        ];
        assert!(contains_category(&path, INLINE_CODE));
        assert!(!contains_category(&path, "string"));
        assert!(!contains_category(&path, COMMENT));
    }

    #[test]
    fn test_comment_shadows_nested_scopes() {
        let path = [
            "source.ase",
            "comment.block.ase",
            "keyword.operator.aseOperator.ase",
        ];
        assert!(contains_category(&path, COMMENT));
        assert!(!contains_category(&path, "aseOperator"));
    }

    #[test]
    fn test_deeper_categories_are_found() {
        let path = ["source.ase", "meta.call.ase", "string.quoted.single.ase"];
        assert!(contains_category(&path, "quoted"));
    }

    #[test]
    fn test_is_typical() {
        assert!(is_typical(&["source.ase"]));
        assert!(is_typical(&["source.ase", "variable.other.ase"]));
        assert!(!is_typical(&["source.ase", "comment.line.double-slash.ase"]));
        assert!(!is_typical(&["source.ase", "string.quoted.double.ase"]));
        assert!(!is_typical(&["source.ase", "meta.embedded.inlinecode.ase"]));
        assert!(!is_typical(&["text.plain"]));
    }
}
