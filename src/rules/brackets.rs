//! Bracket matching
//!
//! One pass per pair keeps a stack of unmatched openers. With the default
//! heuristic strategy a closer pairs with the nearest opener on its row or in
//! its column, which tolerates the odd mis-nested pair on one line but can
//! occasionally pair with an unrelated opener that happens to line up. The
//! strict strategy always pops the most recent opener.

use super::LintContext;
use crate::diagnostic::{DiagnosticSink, Severity};
use crate::error::LintError;
use crate::scanner::scan;
use crate::source::{Position, Range};
use crate::table::BracketStrategy;

pub const ID: &str = "bracket-match";

const MESSAGE: &str = "Missing a matching character";

pub fn run(
    ctx: &LintContext<'_, '_>,
    sink: &mut DiagnosticSink<'_, '_>,
    severity: Severity,
) -> Result<usize, LintError> {
    let mut examined = 0;

    for pair in &ctx.table.brackets {
        let mut openers: Vec<Position> = Vec::new();
        let mut unmatched_closers: Vec<Position> = Vec::new();

        for m in scan(ctx.source, &pair.pattern) {
            examined += 1;

            let position = m.range.start;
            if !ctx.is_typical_at(position)? {
                continue;
            }

            if m.has_group("open") {
                openers.push(position);
                continue;
            }

            match find_opener(&openers, position, ctx.table.bracket_strategy) {
                Some(idx) => {
                    openers.remove(idx);
                }
                None => unmatched_closers.push(position),
            }
        }

        for position in openers.into_iter().chain(unmatched_closers) {
            sink.add(ID, severity, MESSAGE, Range::char_at(position))?;
        }
    }

    Ok(examined)
}

/// Index of the opener a closer at `close` pairs with
fn find_opener(openers: &[Position], close: Position, strategy: BracketStrategy) -> Option<usize> {
    match strategy {
        BracketStrategy::Heuristic => openers
            .iter()
            .rposition(|open| open.column == close.column || open.row == close.row),
        BracketStrategy::Strict => openers.len().checked_sub(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::run_rule;
    use crate::rules::RuleKind;
    use crate::table::{BracketPairConfig, RuleTable, TableConfig};

    fn table(strategy: BracketStrategy) -> RuleTable {
        RuleTable::new(&TableConfig {
            bracket_strategy: strategy,
            ..TableConfig::default()
        })
        .unwrap()
    }

    fn starts(text: &str, strategy: BracketStrategy) -> Vec<Position> {
        run_rule(RuleKind::BracketMatch, &table(strategy), text)
            .into_iter()
            .map(|d| d.range.start)
            .collect()
    }

    #[test]
    fn test_unmatched_opener() {
        let diags = run_rule(RuleKind::BracketMatch, &table(BracketStrategy::Heuristic), "(()");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].message, "Missing a matching character");
        assert_eq!(diags[0].range, Range::single_line(0, 0, 1));
    }

    #[test]
    fn test_balanced_is_clean() {
        assert!(starts("(())", BracketStrategy::Heuristic).is_empty());
        assert!(starts("x[ y{ 1 } ]", BracketStrategy::Heuristic).is_empty());
    }

    #[test]
    fn test_unmatched_closer() {
        assert_eq!(starts(")", BracketStrategy::Heuristic), vec![Position::new(0, 0)]);
    }

    #[test]
    fn test_openers_reported_before_closers() {
        assert_eq!(
            starts(")\n(", BracketStrategy::Heuristic),
            vec![Position::new(1, 0), Position::new(0, 0)]
        );
    }

    #[test]
    fn test_pairs_are_independent() {
        assert_eq!(
            starts("( ]", BracketStrategy::Heuristic),
            vec![Position::new(0, 0), Position::new(0, 2)]
        );
    }

    #[test]
    fn test_heuristic_matches_by_column() {
        let text = "foo(\n   )";
        assert!(starts(text, BracketStrategy::Heuristic).is_empty());
    }

    #[test]
    fn test_heuristic_misses_misaligned_multiline_pairs() {
        let text = "foo(\n)";
        assert_eq!(
            starts(text, BracketStrategy::Heuristic),
            vec![Position::new(0, 3), Position::new(1, 0)]
        );
        assert!(starts(text, BracketStrategy::Strict).is_empty());
    }

    #[test]
    fn test_heuristic_can_pair_an_earlier_aligned_opener() {
        // The closer on row 2 lines up with the row 0 opener and skips the
        // row 1 opener that strict matching would pop.
        let text = "(\n  (\n)";
        assert_eq!(
            starts(text, BracketStrategy::Heuristic),
            vec![Position::new(1, 2)]
        );
        assert_eq!(
            starts(text, BracketStrategy::Strict),
            vec![Position::new(0, 0)]
        );
    }

    #[test]
    fn test_brackets_in_strings_and_comments_are_ignored() {
        let text = "x = \"(\" // )\ny = ( 1 )";
        assert!(starts(text, BracketStrategy::Heuristic).is_empty());
    }

    #[test]
    fn test_multi_character_pair() {
        let table = RuleTable::new(&TableConfig {
            brackets: vec![BracketPairConfig::new(r"\bbegin\b", r"\bend\b")],
            ..TableConfig::default()
        })
        .unwrap();
        let diags = run_rule(RuleKind::BracketMatch, &table, "begin x end\nbegin");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].range, Range::single_line(1, 0, 1));
    }

    #[test]
    fn test_find_opener() {
        let openers = [Position::new(0, 0), Position::new(1, 4)];
        assert_eq!(
            find_opener(&openers, Position::new(2, 0), BracketStrategy::Heuristic),
            Some(0)
        );
        assert_eq!(
            find_opener(&openers, Position::new(2, 1), BracketStrategy::Heuristic),
            None
        );
        assert_eq!(
            find_opener(&openers, Position::new(2, 1), BracketStrategy::Strict),
            Some(1)
        );
        assert_eq!(find_opener(&[], Position::new(0, 0), BracketStrategy::Strict), None);
    }
}
