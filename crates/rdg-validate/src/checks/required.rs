//! Mandatory presence checks.

use rdg_model::FieldRecord;

use super::FieldContext;
use crate::issue::Issue;

/// Empty token on an effectively mandatory field.
pub(crate) fn check_empty(ctx: &FieldContext<'_>) -> Option<Issue> {
    ctx.mandatory.then(|| {
        Issue::Error(format!(
            "Mandatory field '{}' at position {} is empty.",
            ctx.name(),
            ctx.position
        ))
    })
}

/// Field beyond the last token that is effectively mandatory.
pub(crate) fn check_missing(field: &FieldRecord, position: usize) -> Issue {
    Issue::Error(format!(
        "Missing value for mandatory field '{}' (position {position}).",
        field.header.trim()
    ))
}
