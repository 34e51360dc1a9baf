use rdg_rules::{is_iso_date, signals_date};

use super::FieldContext;
use crate::issue::Issue;

/// Date-typed fields must hold an ISO `yyyy-MM-dd` date.
pub(crate) fn check(ctx: &FieldContext<'_>) -> Option<Issue> {
    if !signals_date(&ctx.field.datatype, &ctx.field.format) || is_iso_date(ctx.value) {
        return None;
    }
    Some(Issue::Error(format!(
        "Field '{}' expects date yyyy-MM-dd but got '{}'.",
        ctx.name(),
        ctx.value
    )))
}
