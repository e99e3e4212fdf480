//! Keyword capitalization
//!
//! EXAMPLE: constant `eoi`
//! GOOD: `eoi`
//! BAD: `EOI`, `eOi`

use super::LintContext;
use crate::diagnostic::{DiagnosticSink, Severity, SUGGESTION_MARKER};
use crate::error::LintError;
use crate::scanner::scan;

pub const ID: &str = "casing";

const MESSAGE: &str = "Incorrect capitalization for keyword.";

pub fn run(
    ctx: &LintContext<'_, '_>,
    sink: &mut DiagnosticSink<'_, '_>,
    severity: Severity,
) -> Result<usize, LintError> {
    let mut examined = 0;

    for keyword in &ctx.table.keywords {
        let message = format!("{} {}{}", MESSAGE, SUGGESTION_MARKER, keyword.text);

        for m in scan(ctx.source, &keyword.pattern) {
            examined += 1;
            if m.text == keyword.text {
                continue;
            }
            if !ctx.is_typical_at(m.range.start)? {
                continue;
            }
            sink.add(ID, severity, &message, m.range)?;
        }
    }

    Ok(examined)
}
