//! Hungarian notation for variables
//!
//! EXAMPLE: a node variable
//! GOOD: `$joNode` (lowercase tag `jo`, capitalized word `Node`)
//! BAD: `$jonode`, `$JoNode`

use super::LintContext;
use crate::diagnostic::{DiagnosticSink, Severity};
use crate::error::LintError;
use crate::scanner::scan;
use crate::scope::{contains_category, is_typical, CONSTANT};

pub const ID: &str = "notation";

const MESSAGE: &str = "Does not follow Hungarian Notation";

pub fn run(
    ctx: &LintContext<'_, '_>,
    sink: &mut DiagnosticSink<'_, '_>,
    severity: Severity,
) -> Result<usize, LintError> {
    let mut examined = 0;

    for m in scan(ctx.source, &ctx.table.notation) {
        examined += 1;

        let scope = ctx.scope_at(m.range.start)?;
        if !is_typical(&scope) || contains_category(&scope, CONSTANT) {
            continue;
        }

        let mut name = m.text.chars();
        name.next();
        if !follows_notation(name.as_str()) {
            sink.add(ID, severity, MESSAGE, m.range)?;
        }
    }

    Ok(examined)
}

/// Check a sigil-less name for a lowercase tag followed by a capital
pub fn follows_notation(name: &str) -> bool {
    let lower = name.to_lowercase();
    let first_capital = name
        .chars()
        .zip(lower.chars())
        .position(|(original, lowered)| original != lowered);

    matches!(first_capital, Some(idx) if idx > 0)
}
