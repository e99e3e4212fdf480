//! Operator spacing
//!
//! EXAMPLE: assignment
//! GOOD: `$sName = "x"`
//! BAD: `$sName="x"`
//!
//! A neighbour counts as spacing when it is a space or tab, when there is no
//! neighbour on the line, or when it carries the spacer's good-break scope
//! (so `==` does not flag its own halves).

use super::LintContext;
use crate::diagnostic::{DiagnosticSink, Severity};
use crate::error::LintError;
use crate::scanner::scan;
use crate::scope::{contains_category, is_typical};
use crate::source::Position;

pub const ID: &str = "spacing";

const MESSAGE: &str = "Does not meet spacing standards";

pub fn run(
    ctx: &LintContext<'_, '_>,
    sink: &mut DiagnosticSink<'_, '_>,
    severity: Severity,
) -> Result<usize, LintError> {
    let mut examined = 0;

    for spacer in &ctx.table.spacers {
        for m in scan(ctx.source, &spacer.pattern) {
            examined += 1;

            let scope = ctx.scope_at(m.range.start)?;
            if !is_typical(&scope) {
                continue;
            }
            if !spacer.required_scope.is_empty()
                && !contains_category(&scope, &spacer.required_scope)
            {
                continue;
            }

            let start = m.range.start;
            let before = (start.column > 0).then(|| Position::new(start.row, start.column - 1));
            let after = Some(m.range.end);

            if !is_spaced(ctx, before, &spacer.good_break_scope)?
                || !is_spaced(ctx, after, &spacer.good_break_scope)?
            {
                sink.add(ID, severity, MESSAGE, m.range)?;
            }
        }
    }

    Ok(examined)
}

fn is_spaced(
    ctx: &LintContext<'_, '_>,
    neighbour: Option<Position>,
    good_break_scope: &str,
) -> Result<bool, LintError> {
    let Some(position) = neighbour else {
        return Ok(true);
    };
    let Some(c) = ctx.source.char_at(position) else {
        return Ok(true);
    };
    if c == ' ' || c == '\t' {
        return Ok(true);
    }
    if good_break_scope.is_empty() {
        return Ok(false);
    }
    Ok(contains_category(&ctx.scope_at(position)?, good_break_scope))
}

#[cfg(test)]
mod tests {
    use crate::classifier::OPERATOR_SCOPE;
    use crate::rules::test_support::{run_rule, run_rule_with};
    use crate::rules::RuleKind;
    use crate::scope::ROOT_SCOPE;
    use crate::source::{Position, Range};
    use crate::table::{RuleTable, SpacerConfig, TableConfig};

    fn plus_equals_table() -> RuleTable {
        RuleTable::new(&TableConfig {
            spacers: vec![SpacerConfig::new(r"[\+=]", "", "aseOperator")],
            ..TableConfig::default()
        })
        .unwrap()
    }

    /// Root scope everywhere: no position carries the good-break scope
    fn plain(_: Position) -> Vec<String> {
        vec![ROOT_SCOPE.to_string()]
    }

    #[test]
    fn test_unspaced_operator_is_reported() {
        let diags = run_rule_with(RuleKind::Spacing, &plus_equals_table(), "a+b", &plain);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Does not meet spacing standards");
        assert_eq!(diags[0].range, Range::single_line(0, 1, 2));
        assert!(diags[0].suggestion.is_none());
    }

    #[test]
    fn test_spaced_operator_is_clean() {
        let diags = run_rule_with(RuleKind::Spacing, &plus_equals_table(), "a + b", &plain);
        assert!(diags.is_empty());
        let diags = run_rule_with(RuleKind::Spacing, &plus_equals_table(), "a\t=\tb", &plain);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_one_bad_side_is_enough() {
        let diags = run_rule_with(RuleKind::Spacing, &plus_equals_table(), "a +b", &plain);
        assert_eq!(diags.len(), 1);
        let diags = run_rule_with(RuleKind::Spacing, &plus_equals_table(), "a+ b", &plain);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_line_edges_count_as_spaced() {
        let diags = run_rule_with(RuleKind::Spacing, &plus_equals_table(), "+\n=", &plain);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_good_break_scope_neighbours() {
        let classifier = |position: Position| {
            let mut path = vec![ROOT_SCOPE.to_string()];
            if position.column == 2 || position.column == 3 {
                path.push(OPERATOR_SCOPE.to_string());
            }
            path
        };
        let diags = run_rule_with(RuleKind::Spacing, &plus_equals_table(), "a == b", &classifier);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_lexical_operators() {
        let table = RuleTable::ase().unwrap();
        assert!(run_rule(RuleKind::Spacing, &table, "$iCount += 1").is_empty());
        assert!(run_rule(RuleKind::Spacing, &table, "if ( $a && $b )").is_empty());

        let diags = run_rule(RuleKind::Spacing, &table, "$iCount=$iCount+1");
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].range.start, Position::new(0, 7));
        assert_eq!(diags[1].range.start, Position::new(0, 15));
    }

    #[test]
    fn test_strings_and_comments_are_skipped() {
        let table = RuleTable::ase().unwrap();
        assert!(run_rule(RuleKind::Spacing, &table, "$sQuery = \"a=b+c\" // x=y").is_empty());
    }

    #[test]
    fn test_required_scope_filters_matches() {
        let table = RuleTable::new(&TableConfig {
            spacers: vec![SpacerConfig::new(",", "arguments", "")],
            ..TableConfig::default()
        })
        .unwrap();
        let classifier = |position: Position| {
            let mut path = vec![ROOT_SCOPE.to_string()];
            if position.row == 1 {
                path.push("meta.arguments.ase".to_string());
            }
            path
        };
        let diags = run_rule_with(RuleKind::Spacing, &table, "a,b\nc,d", &classifier);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].range.start, Position::new(1, 1));
    }
}
