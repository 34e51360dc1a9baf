use super::FieldContext;
use crate::issue::Issue;

/// Value must match one declared allowed value exactly.
pub(crate) fn check(ctx: &FieldContext<'_>) -> Option<Issue> {
    if ctx.allowed.is_empty() || ctx.allowed.iter().any(|allowed| allowed == ctx.value) {
        return None;
    }
    Some(Issue::Error(format!(
        "Field '{}' value '{}' not in allowed values: [{}]",
        ctx.name(),
        ctx.value,
        ctx.allowed.join(", ")
    )))
}
