use rdg_rules::{datatype_contains, is_numeric_shaped};

use super::FieldContext;
use crate::issue::Issue;

const NUMERIC_TYPE_HINTS: [&str; 3] = ["enum", "int", "num"];

/// Warn when an enum/int/num field without declared values or range holds
/// something that does not look like a number.
pub(crate) fn check(ctx: &FieldContext<'_>) -> Option<Issue> {
    let numeric_type = NUMERIC_TYPE_HINTS
        .iter()
        .any(|hint| datatype_contains(&ctx.field.datatype, hint));
    if !numeric_type || !ctx.allowed.is_empty() || ctx.range.is_some() || is_numeric_shaped(ctx.value)
    {
        return None;
    }
    Some(Issue::Warning(format!(
        "Field '{}' expected numeric-like value but got '{}'.",
        ctx.name(),
        ctx.value
    )))
}
